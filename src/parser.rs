//! Loading a string graph from GFA1 segments and links.

pub mod error;

pub use self::error::{
    ParseError, ParseFieldError, ParseFieldResult, ParseResult, ParserTolerance,
};

use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::Path;

use bstr::io::BufReadExt;
use bstr::{BString, ByteSlice};
use lazy_static::lazy_static;
use log::{debug, info, warn};
use regex::bytes::Regex;

use crate::alignment::{Match, SeqCoord};
use crate::cigar::CIGAR;
use crate::graph::{Orientation, StringGraph, VertexId};
use crate::overlap::Overlap;
use crate::params::GraphParams;

/// A parsed `L` line, before its segments are resolved to vertices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub from_segment: BString,
    pub from_orient: Orientation,
    pub to_segment: BString,
    pub to_orient: Orientation,
    pub overlap: CIGAR,
}

impl std::fmt::Display for Link {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "L\t{}\t{}\t{}\t{}\t{}",
            self.from_segment,
            self.from_orient,
            self.to_segment,
            self.to_orient,
            self.overlap
        )
    }
}

/// The GFA lines that contribute to a string graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Segment { name: BString, sequence: BString },
    Link(Link),
}

/// Totals of a load, for logging.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    pub segments: usize,
    pub links: usize,
    pub skipped_lines: usize,
    pub skipped_links: usize,
}

#[derive(Debug, Default, Clone)]
pub struct GFAParser {
    tolerance: ParserTolerance,
    params: GraphParams,
}

impl GFAParser {
    pub fn new(params: GraphParams) -> Self {
        GFAParser {
            tolerance: Default::default(),
            params,
        }
    }

    pub fn with_tolerance(self, tolerance: ParserTolerance) -> Self {
        GFAParser { tolerance, ..self }
    }

    /// Parse a single GFA line. Returns `Ok(None)` for line types
    /// that are valid GFA but carry nothing for the graph.
    pub fn parse_line(&self, line: &[u8]) -> ParseResult<Option<Line>> {
        let line = line.trim_end_with(|c| c == '\n' || c == '\r');
        if line.is_empty() {
            return Err(ParseError::EmptyLine);
        }

        let mut fields = line.split_str(b"\t");
        let hdr = fields.next().ok_or(ParseError::EmptyLine)?;

        let invalid_line = |e: ParseFieldError| ParseError::invalid_line(e, line);

        match hdr {
            b"S" => parse_segment(&mut fields).map(Some).map_err(invalid_line),
            b"L" => parse_link(&mut fields)
                .map(|l| Some(Line::Link(l)))
                .map_err(invalid_line),
            b"H" | b"C" | b"P" | b"W" => Ok(None),
            _ if hdr.starts_with(b"#") => Ok(None),
            _ => Err(ParseError::UnknownLineType),
        }
    }

    /// Build a graph from GFA lines. Links are resolved after every
    /// segment has been read, so their order in the input doesn't
    /// matter.
    pub fn parse_lines<I>(&self, lines: I) -> ParseResult<StringGraph>
    where
        I: Iterator,
        I::Item: AsRef<[u8]>,
    {
        self.parse_lines_stats(lines).map(|(graph, _)| graph)
    }

    pub fn parse_lines_stats<I>(
        &self,
        lines: I,
    ) -> ParseResult<(StringGraph, LoadStats)>
    where
        I: Iterator,
        I::Item: AsRef<[u8]>,
    {
        let mut graph = StringGraph::new(self.params);
        let mut stats = LoadStats::default();
        let mut links = Vec::new();

        for line in lines {
            let line = line.as_ref();
            let parsed = self.parse_line(line).and_then(|parsed| match parsed {
                Some(Line::Segment { name, sequence }) => {
                    graph.add_vertex(name, sequence)?;
                    stats.segments += 1;
                    Ok(())
                }
                Some(Line::Link(link)) => {
                    links.push(link);
                    Ok(())
                }
                None => Ok(()),
            });
            self.tolerate(parsed, &mut stats.skipped_lines)?;
        }

        for link in links {
            let added = link_overlap(&graph, &link).and_then(|ovr| match ovr {
                Some(ovr) => {
                    graph.create_edges(ovr)?;
                    stats.links += 1;
                    Ok(())
                }
                None => {
                    stats.skipped_links += 1;
                    Ok(())
                }
            });
            self.tolerate(added, &mut stats.skipped_links)?;
        }

        info!(
            "loaded {} segments and {} links ({} lines and {} links skipped)",
            stats.segments, stats.links, stats.skipped_lines, stats.skipped_links
        );
        Ok((graph, stats))
    }

    pub fn parse_reader<R: BufRead>(&self, reader: R) -> ParseResult<StringGraph> {
        let lines = reader.byte_lines().collect::<Result<Vec<_>, _>>()?;
        self.parse_lines(lines.iter())
    }

    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> ParseResult<StringGraph> {
        let file = File::open(path.as_ref())?;
        debug!("reading {}", path.as_ref().display());
        self.parse_reader(BufReader::new(file))
    }

    fn tolerate(
        &self,
        result: ParseResult<()>,
        skipped: &mut usize,
    ) -> ParseResult<()> {
        match result {
            Ok(()) => Ok(()),
            Err(err) if err.can_safely_continue(&self.tolerance) => {
                if !matches!(err, ParseError::EmptyLine) {
                    warn!("skipping: {}", err);
                }
                *skipped += 1;
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}

fn next_field<'a, I>(fields: &mut I) -> ParseFieldResult<&'a [u8]>
where
    I: Iterator<Item = &'a [u8]>,
{
    fields.next().ok_or(ParseFieldError::MissingFields)
}

fn parse_name(input: &[u8]) -> ParseFieldResult<BString> {
    lazy_static! {
        static ref RE: Regex = Regex::new(r"^[!-)+-<>-~][!-~]*$").unwrap();
    }

    if RE.is_match(input) {
        Ok(input.into())
    } else {
        Err(ParseFieldError::InvalidField("Name"))
    }
}

fn parse_sequence(input: &[u8]) -> ParseFieldResult<BString> {
    lazy_static! {
        static ref RE: Regex = Regex::new(r"^[A-Za-z=.]+$").unwrap();
    }

    if RE.is_match(input) {
        Ok(input.to_ascii_uppercase().into())
    } else {
        Err(ParseFieldError::InvalidField("Sequence"))
    }
}

fn parse_orient(input: &[u8]) -> ParseFieldResult<Orientation> {
    Orientation::parse_error(Orientation::from_bytes_plus_minus(input))
}

fn parse_segment<'a, I>(fields: &mut I) -> ParseFieldResult<Line>
where
    I: Iterator<Item = &'a [u8]>,
{
    let name = parse_name(next_field(fields)?)?;
    let sequence = parse_sequence(next_field(fields)?)?;
    Ok(Line::Segment { name, sequence })
}

fn parse_link<'a, I>(fields: &mut I) -> ParseFieldResult<Link>
where
    I: Iterator<Item = &'a [u8]>,
{
    let from_segment = parse_name(next_field(fields)?)?;
    let from_orient = parse_orient(next_field(fields)?)?;
    let to_segment = parse_name(next_field(fields)?)?;
    let to_orient = parse_orient(next_field(fields)?)?;
    let overlap = CIGAR::from_bytestring(next_field(fields)?)
        .ok_or(ParseFieldError::InvalidField("Overlap"))?;

    Ok(Link {
        from_segment,
        from_orient,
        to_segment,
        to_orient,
        overlap,
    })
}

/// The dovetail overlap a link describes, on the segments' stored
/// strands. `None` for links the graph has no edge for: empty
/// overlaps, self links, and the complement of an already added link.
pub fn link_overlap(
    graph: &StringGraph,
    link: &Link,
) -> ParseResult<Option<Overlap>> {
    let resolve = |name: &BString| -> ParseResult<(VertexId, usize)> {
        let id = graph
            .vertex_by_name(name)
            .ok_or_else(|| ParseError::unknown_segment(name))?;
        Ok((id, graph.seq(id).len()))
    };
    let (from, from_len) = resolve(&link.from_segment)?;
    let (to, to_len) = resolve(&link.to_segment)?;

    let ref_len = link.overlap.ref_len();
    let query_len = link.overlap.query_len();

    if ref_len == 0 || query_len == 0 {
        debug!("skipping empty overlap: {}", link);
        return Ok(None);
    }
    if from == to {
        warn!("skipping self link: {}", link);
        return Ok(None);
    }
    if ref_len > from_len || query_len > to_len {
        let line = link.to_string();
        return Err(ParseError::invalid_line(
            ParseFieldError::InvalidField("Overlap"),
            line.as_bytes(),
        ));
    }

    let from_coord = match link.from_orient {
        Orientation::Forward => {
            SeqCoord::new(from_len - ref_len, from_len, from_len)
        }
        Orientation::Backward => SeqCoord::new(0, ref_len, from_len),
    };
    let to_coord = match link.to_orient {
        Orientation::Forward => SeqCoord::new(0, query_len, to_len),
        Orientation::Backward => {
            SeqCoord::new(to_len - query_len, to_len, to_len)
        }
    };
    let reverse = link.from_orient != link.to_orient;

    let mut m = Match::new(from_coord, to_coord, reverse);
    if let Some(diffs) = link.overlap.differences() {
        m = m.with_diffs(diffs);
    }
    let ovr = Overlap::new(from, to, m);

    if graph.find_edge(from, &ovr.edge_desc()).is_some() {
        debug!("skipping duplicate link: {}", link);
        return Ok(None);
    }

    Ok(Some(ovr))
}
