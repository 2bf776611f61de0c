//! This module provides the parser for machine definition files, utilizing the `pest` crate.
//! It defines the grammar for the line-oriented definition format and functions to parse the
//! input into a `MachineDefinition`.

use crate::{
    analyzer::analyze,
    definition::MachineDefinition,
    types::{Direction, StateId, Symbol, TraceError, TransitionRule, BLANK_SYMBOL},
};
use pest::{
    error::{Error, ErrorVariant},
    iterators::{Pair, Pairs},
    Parser as PestParser, Span,
};
use pest_derive::Parser as PestParser;

/// Derives a `PestParser` for the definition grammar in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct DefinitionParser;

/// Parses the given input string into a `MachineDefinition`.
///
/// This is the main entry point for parsing machine definitions. It trims the input, parses
/// it using the `DefinitionParser`, and then processes the resulting parse tree into a
/// structured `MachineDefinition`. The parsed definition is validated before being returned.
///
/// # Arguments
///
/// * `input` - A string slice containing the machine definition.
///
/// # Returns
///
/// * `Ok(MachineDefinition)` if the input is successfully parsed and validated.
/// * `Err(TraceError::ParseError)` if there are any syntax errors.
/// * `Err(TraceError::ValidationError)` if the definition breaks an invariant.
pub fn parse(input: &str) -> Result<MachineDefinition, TraceError> {
    let root = DefinitionParser::parse(Rule::definition, input.trim())
        .map_err(|e| TraceError::ParseError(e.into()))?
        .next()
        .ok_or_else(|| TraceError::ValidationError("Empty definition".to_string()))?;

    let definition = parse_definition(root)?;

    // Analyze the parsed definition
    analyze(&definition)?;

    Ok(definition)
}

/// Parses the top-level structure of a definition from a `Pair<Rule::definition>`.
fn parse_definition(pair: Pair<Rule>) -> Result<MachineDefinition, TraceError> {
    let span = pair.as_span();
    let mut name: Option<String> = None;
    let mut states: Option<Vec<StateId>> = None;
    let mut input_alphabet: Option<Vec<Symbol>> = None;
    let mut tape_alphabet: Option<Vec<Symbol>> = None;
    let mut start: Option<StateId> = None;
    let mut accept: Option<StateId> = None;
    let mut reject: Option<StateId> = None;
    let mut rules = Vec::new();

    for p in pair.into_inner() {
        match p.as_rule() {
            Rule::name => name = Some(p.as_str().trim().to_string()),
            Rule::states => states = Some(parse_identifiers(p.into_inner())),
            Rule::input_alphabet => {
                input_alphabet = Some(parse_alphabet(p, "input alphabet")?);
            }
            Rule::tape_alphabet => tape_alphabet = Some(parse_alphabet(p, "tape alphabet")?),
            Rule::start => start = Some(parse_inner_string(p)?),
            Rule::accept => accept = Some(parse_inner_string(p)?),
            Rule::reject => reject = Some(parse_inner_string(p)?),
            Rule::transition => rules.push(parse_transition(p)?),
            _ => {} // Skip EOI
        }
    }

    Ok(MachineDefinition {
        name: check_required_rule(name, "name", span)?,
        states: check_required_rule(states, "states", span)?,
        input_alphabet: check_required_rule(input_alphabet, "input alphabet", span)?,
        tape_alphabet: check_required_rule(tape_alphabet, "tape alphabet", span)?,
        start: check_required_rule(start, "start", span)?,
        accept: check_required_rule(accept, "accept", span)?,
        reject: check_required_rule(reject, "reject", span)?,
        rules,
    })
}

/// Parses a single transition rule from a `Pair<Rule::transition>`.
///
/// Rule: transition > identifier, symbol, identifier, symbol, direction
fn parse_transition(pair: Pair<Rule>) -> Result<TransitionRule, TraceError> {
    let span = pair.as_span();
    let mut pairs = pair.into_inner();

    let from_state = parse_string(&mut pairs, span)?;
    let read_symbol = parse_symbol(&parse_string(&mut pairs, span)?);
    let to_state = parse_string(&mut pairs, span)?;
    let write_symbol = parse_symbol(&parse_string(&mut pairs, span)?);
    let direction = match pairs.next() {
        Some(p) => parse_direction(p)?,
        None => return Err(parse_error("Missing direction", span)),
    };

    Ok(TransitionRule {
        from_state,
        read_symbol,
        to_state,
        write_symbol,
        direction,
    })
}

/// Parses a single direction from a `Pair<Rule::direction>`.
///
/// Supports 'L' for Left and 'R' for Right.
fn parse_direction(pair: Pair<Rule>) -> Result<Direction, TraceError> {
    let span = pair.as_span();
    match pair.as_str() {
        "L" => Ok(Direction::Left),
        "R" => Ok(Direction::Right),
        _ => Err(parse_error(
            &format!("Unsupported direction: {}", pair.as_str()),
            span,
        )),
    }
}

/// Parses a comma-separated alphabet, rejecting repeated symbols.
fn parse_alphabet(pair: Pair<Rule>, section: &str) -> Result<Vec<Symbol>, TraceError> {
    let mut symbols = Vec::new();

    for symbol_pair in pair.into_inner() {
        let symbol = parse_symbol(symbol_pair.as_str());
        if symbols.contains(&symbol) {
            return Err(parse_error(
                &format!("Duplicate symbol '{}' in {}", symbol, section),
                symbol_pair.as_span(),
            ));
        }
        symbols.push(symbol);
    }

    Ok(symbols)
}

/// Collects the identifiers of a comma-separated list, dropping repeats.
fn parse_identifiers(pairs: Pairs<Rule>) -> Vec<StateId> {
    let mut identifiers: Vec<StateId> = Vec::new();

    for p in pairs {
        let identifier = p.as_str().to_string();
        if !identifiers.contains(&identifier) {
            identifiers.push(identifier);
        }
    }

    identifiers
}

/// Parses a single character symbol from a string.
fn parse_symbol(input: &str) -> Symbol {
    input.chars().next().unwrap_or(BLANK_SYMBOL)
}

/// Extracts the inner string content from a `Pair`.
fn parse_inner_string(pair: Pair<Rule>) -> Result<String, TraceError> {
    let span = pair.as_span();
    parse_string(&mut pair.into_inner(), span)
}

/// Extracts the string content from the current `Pair` in a `Pairs` iterator.
fn parse_string(pairs: &mut Pairs<Rule>, span: Span) -> Result<String, TraceError> {
    pairs
        .next()
        .map(|p| p.as_str().to_string())
        .ok_or_else(|| parse_error("Unexpected end of line", span))
}

/// Creates a `TraceError::ParseError` from a message and a `Span`.
fn parse_error(msg: &str, span: Span) -> TraceError {
    TraceError::ParseError(Box::new(Error::new_from_span(
        ErrorVariant::CustomError {
            message: msg.to_string(),
        },
        span,
    )))
}

/// Ensures a mandatory section was parsed.
fn check_required_rule<T>(value: Option<T>, section: &str, span: Span) -> Result<T, TraceError> {
    value.ok_or_else(|| parse_error(&format!("Missing \"{}\" line", section), span))
}
