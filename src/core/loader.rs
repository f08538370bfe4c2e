//! Reading decks from disk. The only file I/O the core touches, kept apart
//! from the parser so parsing stays a pure function of text.

use std::fmt;
use std::fs;
use std::path::Path;

use log::{info, warn};

use crate::core::model::Presentation;
use crate::core::navigation::{EmptyDocument, Navigator};
use crate::core::parser::parse;

#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    EmptyDocument,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "cannot read deck: {e}"),
            LoadError::EmptyDocument => write!(f, "{}", EmptyDocument),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::EmptyDocument => None,
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<EmptyDocument> for LoadError {
    fn from(_: EmptyDocument) -> Self {
        LoadError::EmptyDocument
    }
}

/// Read the deck text.
pub fn read_text(path: &Path) -> Result<String, LoadError> {
    let text = fs::read_to_string(path)?;
    info!("Read {} bytes from {}", text.len(), path.display());
    Ok(text)
}

/// Read and parse a deck, logging whatever the parser had to recover from.
pub fn load_presentation(path: &Path) -> Result<Presentation, LoadError> {
    let presentation = parse(&read_text(path)?);
    for diagnostic in &presentation.diagnostics {
        warn!("{}: {diagnostic}", path.display());
    }
    Ok(presentation)
}

/// Read, parse, and start navigating a deck.
pub fn open(path: &Path) -> Result<Navigator, LoadError> {
    Ok(Navigator::new(load_presentation(path)?)?)
}
