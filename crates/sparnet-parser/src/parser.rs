//! Photonic netlist parser.

use std::fs;
use std::path::Path;

use sparnet_core::units::str_to_sci;
use sparnet_core::{Component, ComponentParams, ComponentType, NetId, Netlist, Point};

use crate::error::{Error, Result};
use crate::lexer::{Lexer, SpannedToken, Token};

/// Parse netlist text into a [`Netlist`].
///
/// Parsing stops at the first `.ends` directive. Any error aborts the whole
/// parse; no partial netlist is returned.
pub fn parse(input: &str) -> Result<Netlist> {
    let lexer = Lexer::new(input);
    let tokens = lexer.tokenize()?;
    let parser = Parser::new(&tokens);
    parser.parse_all()
}

/// Read and parse a netlist file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Netlist> {
    let path = path.as_ref();
    log::debug!("reading netlist {}", path.display());
    let text = fs::read_to_string(path)?;
    parse(&text)
}

/// A component line after key-value parsing, before its type is resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct RawComponentLine {
    /// Source line number.
    pub line: usize,
    /// Instance name (first word on the line).
    pub instance: String,
    /// Component type name, if the line had one.
    pub type_name: Option<String>,
    /// Nets in order of appearance.
    pub nets: Vec<NetId>,
    /// Recognized parameters.
    pub params: ComponentParams,
}

impl RawComponentLine {
    /// Resolve the component type and build the typed component.
    pub fn into_component(self) -> Result<Component> {
        let line = self.line;
        let type_name = self.type_name.ok_or_else(|| Error::ParseError {
            line,
            message: format!("component '{}' has no type", self.instance),
        })?;
        let ty = ComponentType::lookup(&type_name).map_err(|source| Error::Core { line, source })?;
        Ok(Component::from_params(self.instance, ty, self.nets, &self.params))
    }
}

/// Parser state.
struct Parser<'a> {
    tokens: &'a [SpannedToken],
    pos: usize,
    netlist: Netlist,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [SpannedToken]) -> Self {
        Self {
            tokens,
            pos: 0,
            netlist: Netlist::new(),
        }
    }

    fn parse_all(mut self) -> Result<Netlist> {
        loop {
            match self.peek() {
                Token::Eof => break,
                Token::Eol => self.advance(),
                Token::Command(cmd) if cmd.starts_with("ends") => break,
                Token::Command(cmd) => {
                    log::debug!("line {}: skipping directive .{}", self.current_line(), cmd);
                    self.skip_to_eol();
                }
                Token::Name(_) => {
                    let raw = self.parse_component_line()?;
                    self.netlist.push(raw.into_component()?);
                }
                other => {
                    return Err(Error::ParseError {
                        line: self.current_line(),
                        message: format!("unexpected token at line start: {:?}", other),
                    })
                }
            }
        }

        log::info!(
            "parsed {} components, highest internal net {}",
            self.netlist.len(),
            self.netlist.net_count()
        );
        Ok(self.netlist)
    }

    fn parse_component_line(&mut self) -> Result<RawComponentLine> {
        let line = self.current_line();
        let instance = match self.peek() {
            Token::Name(name) => name.clone(),
            other => {
                return Err(Error::ParseError {
                    line,
                    message: format!("expected instance name, found {:?}", other),
                })
            }
        };
        self.advance();

        let mut raw = RawComponentLine {
            line,
            instance,
            type_name: None,
            nets: Vec::new(),
            params: ComponentParams::default(),
        };

        loop {
            match self.peek() {
                Token::Eol | Token::Eof => break,
                Token::Net(net) => raw.nets.push(*net),
                Token::Name(word) if raw.type_name.is_none() => {
                    raw.type_name = Some(word.clone());
                }
                Token::Param { key, .. } if raw.type_name.is_none() => {
                    return Err(Error::ParseError {
                        line,
                        message: format!("expected component type before parameter '{}'", key),
                    });
                }
                Token::Param { key, value } => apply_param(&mut raw.params, key, value, line)?,
                Token::Name(word) => log::debug!("line {}: ignoring token '{}'", line, word),
                Token::Command(cmd) => log::debug!("line {}: ignoring token '.{}'", line, cmd),
            }
            self.advance();
        }

        Ok(raw)
    }

    fn peek(&self) -> &'a Token {
        &self.tokens[self.pos].token
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
    }

    fn current_line(&self) -> usize {
        self.tokens[self.pos].line
    }

    fn skip_to_eol(&mut self) {
        while !matches!(self.peek(), Token::Eol | Token::Eof) {
            self.advance();
        }
    }
}

/// Store a recognized `key=value` parameter.
fn apply_param(params: &mut ComponentParams, key: &str, value: &str, line: usize) -> Result<()> {
    let invalid = || Error::ParseError {
        line,
        message: format!("invalid value for {}: '{}'", key, value),
    };
    let scaled = |value: &str| str_to_sci(value).map_err(|source| Error::Core { line, source });

    match key {
        "lay_x" => params.lay_x = Some(scaled(value)?),
        "lay_y" => params.lay_y = Some(scaled(value)?),
        "radius" => params.radius = Some(scaled(value)?),
        "wg_length" => params.length = Some(scaled(value)?),
        // Widths are kept in microns.
        "wg_width" => params.width = Some(scaled(value)? * 1e6),
        "points" => params.points = Some(parse_points(value).ok_or_else(invalid)?),
        _ => log::debug!("line {}: ignoring parameter '{}'", line, key),
    }
    Ok(())
}

/// Parse a `"[[x,y],[x,y],...]"` vertex list.
fn parse_points(value: &str) -> Option<Vec<Point>> {
    let inner = value.trim().trim_matches('"').trim();
    let inner = inner.strip_prefix('[')?.strip_suffix(']')?.trim();
    if inner.is_empty() {
        return Some(Vec::new());
    }

    inner
        .strip_prefix('[')?
        .strip_suffix(']')?
        .split("],[")
        .map(|pair| {
            let (x, y) = pair.split_once(',')?;
            Some((x.trim().parse().ok()?, y.trim().parse().ok()?))
        })
        .collect()
}
