use std::{error, fmt};

use bstr::ByteSlice;

use crate::graph::GraphError;

pub type ParseFieldResult<T> = Result<T, ParseFieldError>;
pub type ParseResult<T> = Result<T, ParseError>;

/// How many kinds of bad lines the loader skips instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserTolerance {
    /// Skip every line that can't be turned into graph elements.
    IgnoreAll,
    /// Skip empty lines and unknown line types only.
    Safe,
    /// Fail on anything unexpected.
    Pedantic,
}

impl Default for ParserTolerance {
    fn default() -> Self {
        Self::Safe
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseFieldError {
    /// Attempted to parse an orientation that wasn't + or -.
    OrientationError,
    /// A required field was incorrectly formatted. Includes the field
    /// name as GFA1 defines it.
    InvalidField(&'static str),
    MissingFields,
}

impl fmt::Display for ParseFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ParseFieldError as PFE;
        match self {
            PFE::OrientationError => {
                write!(f, "Failed to parse an orientation character")
            }
            PFE::InvalidField(field) => {
                write!(f, "Failed to parse field `{}`", field)
            }
            PFE::MissingFields => write!(f, "Line is missing required fields"),
        }
    }
}

impl error::Error for ParseFieldError {}

/// Everything that can go wrong while loading a GFA file into a
/// string graph
#[derive(Debug)]
pub enum ParseError {
    /// The line type was something other than 'H', 'S', 'L', 'C',
    /// 'P', 'W' or a comment.
    UnknownLineType,
    /// Tried to parse an empty line. Can be ignored.
    EmptyLine,
    /// A line couldn't be parsed. Includes the problem line and a
    /// variant describing the error.
    InvalidLine(ParseFieldError, String),
    /// A field couldn't be parsed
    InvalidField(ParseFieldError),
    /// A link refers to a segment that no `S` line defines.
    UnknownSegment(String),
    /// The graph refused a vertex or an edge built from the file.
    Graph(GraphError),
    /// Wrapper for an IO error.
    IOError(std::io::Error),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ParseError as PE;
        match self {
            PE::UnknownLineType => {
                write!(f, "Line type was not one of 'H', 'S', 'L', 'C', 'P', 'W'")
            }
            PE::EmptyLine => write!(f, "Line was empty"),
            PE::InvalidLine(field_err, line) => {
                write!(f, "Failed to parse line {}, error: {}", line, field_err)
            }
            PE::InvalidField(field_err) => {
                write!(f, "Failed to parse field: {}", field_err)
            }
            PE::UnknownSegment(name) => {
                write!(f, "Link refers to unknown segment `{}`", name)
            }
            PE::Graph(err) => write!(f, "Graph error: {}", err),
            PE::IOError(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl From<std::io::Error> for ParseError {
    #[inline]
    fn from(err: std::io::Error) -> Self {
        Self::IOError(err)
    }
}

impl From<ParseFieldError> for ParseError {
    #[inline]
    fn from(err: ParseFieldError) -> Self {
        Self::InvalidField(err)
    }
}

impl From<GraphError> for ParseError {
    #[inline]
    fn from(err: GraphError) -> Self {
        Self::Graph(err)
    }
}

impl error::Error for ParseError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ParseError::Graph(err) => Some(err),
            ParseError::IOError(err) => Some(err),
            _ => None,
        }
    }
}

impl ParseError {
    #[inline]
    pub(crate) fn invalid_line(error: ParseFieldError, line: &[u8]) -> Self {
        let mut dest = String::new();
        line.to_str_lossy_into(&mut dest);
        Self::InvalidLine(error, dest)
    }

    #[inline]
    pub(crate) fn unknown_segment(name: &[u8]) -> Self {
        Self::UnknownSegment(name.to_str_lossy().into_owned())
    }

    #[inline]
    pub fn can_safely_continue(&self, tol: &ParserTolerance) -> bool {
        use ParserTolerance as Tol;
        match tol {
            Tol::IgnoreAll => !matches!(self, ParseError::IOError(_)),
            Tol::Safe => match self {
                ParseError::EmptyLine => true,
                ParseError::UnknownLineType => true,
                _ => false,
            },
            Tol::Pedantic => false,
        }
    }
}
