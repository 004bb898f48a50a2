//! Wrapped `/key=value` qualifier records.
//!
//! A record starts with a fixed-width prefix of spaces (21 columns in a
//! GenBank feature table) followed by `/key`, optionally `=value`. Quoted and
//! parenthesised values may continue over several physical lines; every
//! continuation line carries the same prefix.
//!
//! Parsed values keep their line breaks as `\n` with the prefix stripped, and
//! rendering puts the prefix back. Breaks introduced by folding are recorded
//! in the qualifier's [`Layout`] instead of the value.
use log::trace;

use featloc_core::models::{Layout, Qualifier, QualifierValue, Qualifiers};

use crate::config::FormatConfig;
use crate::error::{QualifierError, QualifierResult};

/// The value syntax a qualifier key accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// No value, e.g. `/pseudo`.
    Flag,
    /// A quoted string, e.g. `/gene="dnaA"`.
    Quoted,
    /// A bare token or a parenthesised expression, e.g. `/codon_start=1`.
    Literal,
    /// A parenthesised expression, e.g. `/anticodon=(pos:34..36,aa:Phe)`.
    Expression,
    /// Keys not listed in the INSDC vocabulary accept any form.
    Any,
}

const FLAG_KEYS: &[&str] = &[
    "circular_RNA",
    "environmental_sample",
    "focus",
    "germline",
    "macronuclear",
    "partial",
    "proviral",
    "pseudo",
    "rearranged",
    "ribosomal_slippage",
    "trans_splicing",
    "transgenic",
];

const LITERAL_KEYS: &[&str] = &[
    "calculated_mol_wt",
    "citation",
    "codon_start",
    "compare",
    "direction",
    "estimated_length",
    "label",
    "mod_base",
    "number",
    "rpt_type",
    "rpt_unit_range",
    "tag_peptide",
    "transl_table",
];

const EXPRESSION_KEYS: &[&str] = &["anticodon", "codon", "transl_except"];

const QUOTED_KEYS: &[&str] = &[
    "allele",
    "altitude",
    "artificial_location",
    "bio_material",
    "bond_type",
    "bound_moiety",
    "cell_line",
    "cell_type",
    "chromosome",
    "clone",
    "clone_lib",
    "coded_by",
    "collected_by",
    "collection_date",
    "country",
    "cultivar",
    "culture_collection",
    "db_xref",
    "dev_stage",
    "EC_number",
    "ecotype",
    "exception",
    "experiment",
    "frequency",
    "function",
    "gap_type",
    "gene",
    "gene_synonym",
    "haplogroup",
    "haplotype",
    "host",
    "identified_by",
    "inference",
    "isolate",
    "isolation_source",
    "lab_host",
    "lat_lon",
    "linkage_evidence",
    "locus_tag",
    "map",
    "mating_type",
    "metagenome_source",
    "mobile_element_type",
    "mol_type",
    "ncRNA_class",
    "note",
    "old_locus_tag",
    "operon",
    "organelle",
    "organism",
    "PCR_conditions",
    "PCR_primers",
    "phenotype",
    "plasmid",
    "pop_variant",
    "product",
    "protein_id",
    "pseudogene",
    "recombination_class",
    "region_name",
    "regulatory_class",
    "replace",
    "rpt_family",
    "rpt_unit_seq",
    "satellite",
    "segment",
    "serotype",
    "serovar",
    "sex",
    "site_type",
    "specimen_voucher",
    "standard_name",
    "strain",
    "sub_clone",
    "sub_species",
    "sub_strain",
    "submitter_seqid",
    "tissue_lib",
    "tissue_type",
    "translation",
    "type_material",
    "variety",
];

/// Look up the value syntax accepted by `key`.
pub fn value_kind(key: &str) -> ValueKind {
    if FLAG_KEYS.contains(&key) {
        ValueKind::Flag
    } else if LITERAL_KEYS.contains(&key) {
        ValueKind::Literal
    } else if EXPRESSION_KEYS.contains(&key) {
        ValueKind::Expression
    } else if QUOTED_KEYS.contains(&key) {
        ValueKind::Quoted
    } else {
        ValueKind::Any
    }
}

fn is_key_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

fn char_offset(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map_or(s.len(), |(i, _)| i)
}

struct Cursor<'a> {
    input: &'a str,
    pos: usize,
    // start of the current physical line, prefix included
    line_start: usize,
    // start of the current record after its prefix
    origin: usize,
    // input bytes since `origin` that are not part of the rendered record
    skipped: usize,
    folds: Vec<usize>,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Cursor {
            input,
            pos: 0,
            line_start: 0,
            origin: 0,
            skipped: 0,
            folds: Vec::new(),
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn eat_spaces(&mut self, n: usize) -> bool {
        let rest = self.rest().as_bytes();
        if rest.len() >= n && rest[..n].iter().all(|&b| b == b' ') {
            self.pos += n;
            true
        } else {
            false
        }
    }

    fn at_record_end(&self) -> bool {
        matches!(self.peek(), None | Some('\n'))
    }

    fn line_chars(&self) -> usize {
        self.input[self.line_start..self.pos].chars().count()
    }

    /// Offset of the current position in the rendered `/key=value` text.
    fn rendered_offset(&self) -> usize {
        self.pos - self.origin - self.skipped
    }
}

///
/// Parser and renderer for qualifier records with a fixed prefix width and
/// line width.
///
/// Parsed records remember their line layout and render back byte for byte.
/// Records built in code are folded to the width; a fold either ends the
/// line with the space it broke at, or fills the line to exactly the width
/// when a token has to be cut. The parser reads both kinds of break back as
/// layout rather than as part of the value.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualifierFormat {
    pub indent: usize,
    pub width: usize,
}

impl Default for QualifierFormat {
    fn default() -> Self {
        QualifierFormat::from(&FormatConfig::default())
    }
}

impl From<&FormatConfig> for QualifierFormat {
    fn from(config: &FormatConfig) -> Self {
        QualifierFormat {
            indent: config.qualifier_indent,
            width: config.line_width,
        }
    }
}

impl QualifierFormat {
    pub fn new(indent: usize, width: usize) -> Self {
        QualifierFormat { indent, width }
    }

    /// Parse exactly one qualifier record.
    pub fn parse(&self, input: &str) -> QualifierResult<Qualifier> {
        let (qualifier, rest) = self.parse_prefix(input)?;
        if !rest.is_empty() {
            return Err(QualifierError::TrailingInput {
                position: input.len() - rest.len(),
            });
        }
        Ok(qualifier)
    }

    /// Parse one qualifier record at the start of `input`. The remainder
    /// starts at the line break that ends the record, if any.
    pub fn parse_prefix<'a>(&self, input: &'a str) -> QualifierResult<(Qualifier, &'a str)> {
        let mut cur = Cursor::new(input);
        let qualifier = self.record(&mut cur)?;
        Ok((qualifier, cur.rest()))
    }

    /// Parse consecutive records separated by line breaks, such as the
    /// qualifiers of one feature. A trailing line break is allowed.
    pub fn parse_block(&self, input: &str) -> QualifierResult<Qualifiers> {
        let mut qualifiers = Qualifiers::new();
        let mut cur = Cursor::new(input);
        while !cur.rest().is_empty() {
            qualifiers.push(self.record(&mut cur)?);
            if !cur.eat('\n') && !cur.rest().is_empty() {
                return Err(QualifierError::TrailingInput { position: cur.pos });
            }
        }
        Ok(qualifiers)
    }

    fn record(&self, cur: &mut Cursor) -> QualifierResult<Qualifier> {
        let result = self.record_inner(cur);
        if let Err(e) = &result {
            trace!("qualifier parse failed at {}: {}", e.position(), e);
        }
        result
    }

    fn record_inner(&self, cur: &mut Cursor) -> QualifierResult<Qualifier> {
        cur.line_start = cur.pos;
        if !cur.eat_spaces(self.indent) {
            return Err(QualifierError::MissingPrefix {
                position: cur.pos,
                indent: self.indent,
            });
        }
        cur.origin = cur.pos;
        cur.skipped = 0;
        cur.folds.clear();
        if !cur.eat('/') {
            return Err(QualifierError::MissingSlash { position: cur.pos });
        }

        let key_start = cur.pos;
        let key_len = cur.rest().bytes().take_while(|&b| is_key_byte(b)).count();
        if key_len == 0 {
            return Err(QualifierError::InvalidKey { position: key_start });
        }
        cur.pos += key_len;
        let key = &cur.input[key_start..cur.pos];
        let kind = value_kind(key);

        if cur.at_record_end() {
            return match kind {
                ValueKind::Flag | ValueKind::Any => {
                    Ok(Qualifier::flag(key).with_layout(Layout::Fixed(Vec::new())))
                }
                _ => Err(QualifierError::MissingValue {
                    key: key.to_string(),
                    position: cur.pos,
                }),
            };
        }

        match cur.peek() {
            Some('=') if kind == ValueKind::Flag => {
                return Err(QualifierError::UnexpectedValue {
                    key: key.to_string(),
                    position: cur.pos,
                });
            }
            Some('=') => cur.pos += 1,
            found => {
                return Err(QualifierError::UnexpectedChar {
                    position: cur.pos,
                    found: found.unwrap_or(' '),
                });
            }
        }

        let value = self.value(cur, key, kind)?;
        if !cur.at_record_end() {
            return Err(QualifierError::TrailingInput { position: cur.pos });
        }
        let layout = Layout::Fixed(std::mem::take(&mut cur.folds));
        Ok(Qualifier::new(key, Some(value)).with_layout(layout))
    }

    fn value(&self, cur: &mut Cursor, key: &str, kind: ValueKind) -> QualifierResult<QualifierValue> {
        let invalid = |form: &'static str, position: usize| QualifierError::InvalidForm {
            key: key.to_string(),
            form,
            position,
        };
        match cur.peek() {
            None | Some('\n') => Err(QualifierError::MissingValue {
                key: key.to_string(),
                position: cur.pos,
            }),
            Some('"') => match kind {
                ValueKind::Quoted | ValueKind::Any => self.quoted(cur),
                _ => Err(invalid("quoted", cur.pos)),
            },
            Some('(') => match kind {
                ValueKind::Expression | ValueKind::Literal | ValueKind::Any => self.expression(cur),
                _ => Err(invalid("parenthesised", cur.pos)),
            },
            Some(_) => match kind {
                ValueKind::Literal | ValueKind::Any => literal(cur),
                _ => Err(invalid("literal", cur.pos)),
            },
        }
    }

    // Whether the line break at the cursor was put there by folding: the
    // line ends with a space after its prefix, or it was filled to the width. A quoted line
    // one short of the width counts when the next line opens with an
    // escaped quote, since folding never separates the two halves of `""`.
    fn is_fold(&self, cur: &Cursor, quoted: bool) -> bool {
        if cur.pos > cur.line_start + self.indent && cur.input[..cur.pos].ends_with(' ') {
            return true;
        }
        if self.width <= self.indent {
            return false;
        }
        let chars = cur.line_chars();
        chars == self.width
            || (quoted
                && chars + 1 == self.width
                && cur.input[cur.pos + 1..]
                    .get(self.indent..)
                    .is_some_and(|next| next.starts_with("\"\"")))
    }

    // Consume a line break inside a value together with the prefix of the
    // following line.
    fn continuation(&self, cur: &mut Cursor, fold: bool) -> QualifierResult<()> {
        if fold {
            let at = cur.rendered_offset();
            cur.folds.push(at);
            cur.skipped += 1;
        }
        cur.pos += 1;
        cur.line_start = cur.pos;
        if cur.eat_spaces(self.indent) {
            cur.skipped += self.indent;
            Ok(())
        } else {
            Err(QualifierError::BadContinuation {
                position: cur.pos,
                indent: self.indent,
            })
        }
    }

    fn quoted(&self, cur: &mut Cursor) -> QualifierResult<QualifierValue> {
        let start = cur.pos;
        cur.pos += 1;
        let mut text = String::new();
        loop {
            let rest = cur.rest();
            let Some(idx) = rest.find(['"', '\n']) else {
                return Err(QualifierError::Unterminated {
                    form: "quoted",
                    position: start,
                });
            };
            text.push_str(&rest[..idx]);
            cur.pos += idx;
            if rest[idx..].starts_with('\n') {
                let fold = self.is_fold(cur, true);
                self.continuation(cur, fold)?;
                if !fold {
                    text.push('\n');
                }
                continue;
            }
            cur.pos += 1;
            if cur.eat('"') {
                text.push('"');
                continue;
            }
            return Ok(QualifierValue::Quoted(text));
        }
    }

    fn expression(&self, cur: &mut Cursor) -> QualifierResult<QualifierValue> {
        let start = cur.pos;
        let mut depth = 0usize;
        let mut text = String::new();
        loop {
            let rest = cur.rest();
            let Some(idx) = rest.find(['(', ')', '\n']) else {
                return Err(QualifierError::Unterminated {
                    form: "parenthesised",
                    position: start,
                });
            };
            text.push_str(&rest[..idx]);
            cur.pos += idx;
            match rest.as_bytes()[idx] {
                b'\n' => {
                    let fold = self.is_fold(cur, false);
                    self.continuation(cur, fold)?;
                    if !fold {
                        text.push('\n');
                    }
                }
                b'(' => {
                    depth += 1;
                    text.push('(');
                    cur.pos += 1;
                }
                _ => {
                    depth -= 1;
                    text.push(')');
                    cur.pos += 1;
                    if depth == 0 {
                        return Ok(QualifierValue::Expression(text));
                    }
                }
            }
        }
    }

    /// Render a qualifier record. Stored line breaks always start a new line;
    /// a parsed record keeps the rest of its layout, anything else is folded
    /// to the width.
    pub fn format(&self, qualifier: &Qualifier) -> String {
        let text = qualifier.to_string();
        let lines = match &qualifier.layout {
            Layout::Fixed(folds) => fixed_lines(&text, folds),
            Layout::Flow => self.flow_lines(qualifier, &text),
        };
        let prefix = " ".repeat(self.indent);
        lines
            .iter()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render several records, one after another.
    pub fn format_block(&self, qualifiers: &Qualifiers) -> String {
        qualifiers
            .iter()
            .map(|q| self.format(q))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn flow_lines<'a>(&self, qualifier: &Qualifier, text: &'a str) -> Vec<&'a str> {
        // folds stay behind the opening quote or parenthesis
        let (body, quoted) = match &qualifier.value {
            Some(QualifierValue::Quoted(_)) => (qualifier.key.len() + 3, true),
            Some(QualifierValue::Expression(_)) => (qualifier.key.len() + 3, false),
            _ => return text.split('\n').collect(),
        };
        let mut lines = Vec::new();
        for (n, line) in text.split('\n').enumerate() {
            let min = if n == 0 { body } else { 0 };
            self.fold(line, min, quoted, &mut lines);
        }
        lines
    }

    fn fold<'a>(&self, mut line: &'a str, mut min: usize, quoted: bool, out: &mut Vec<&'a str>) {
        let room = self.width.saturating_sub(self.indent);
        while room > 0 && line.chars().count() > room {
            let limit = char_offset(line, room);
            if limit <= min {
                break;
            }
            let cut = match line[min..limit].rfind(' ') {
                Some(i) => min + i + 1,
                None if quoted && splits_escape(&line[min..limit]) => limit - 1,
                None => limit,
            };
            if cut == 0 {
                break;
            }
            trace!("folding qualifier line at column {}", self.indent + cut);
            out.push(&line[..cut]);
            line = &line[cut..];
            min = 0;
        }
        out.push(line);
    }
}

// Whether `head` ends in the first half of a `""` escape.
fn splits_escape(head: &str) -> bool {
    head.bytes().rev().take_while(|&b| b == b'"').count() % 2 == 1
}

fn fixed_lines<'a>(text: &'a str, folds: &[usize]) -> Vec<&'a str> {
    let mut cuts: Vec<(usize, usize)> = folds
        .iter()
        .filter(|&&at| at > 0 && at < text.len() && text.is_char_boundary(at))
        .map(|&at| (at, at))
        .collect();
    cuts.extend(text.match_indices('\n').map(|(at, _)| (at, at + 1)));
    cuts.sort_unstable();

    let mut lines = Vec::new();
    let mut start = 0;
    for (end, next) in cuts {
        if end < start {
            continue;
        }
        lines.push(&text[start..end]);
        start = next;
    }
    lines.push(&text[start..]);
    lines
}

fn literal(cur: &mut Cursor) -> QualifierResult<QualifierValue> {
    let start = cur.pos;
    let len = cur
        .rest()
        .bytes()
        .take_while(|b| !b.is_ascii_whitespace() && *b != b'"')
        .count();
    if len == 0 {
        return Err(QualifierError::UnexpectedChar {
            position: start,
            found: cur.peek().unwrap_or(' '),
        });
    }
    cur.pos += len;
    Ok(QualifierValue::Literal(cur.input[start..cur.pos].to_string()))
}
