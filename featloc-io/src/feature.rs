use log::trace;

use featloc_core::models::{Feature, FeatureTable, Location};

use crate::config::FormatConfig;
use crate::error::{FeatureError, FeatureResult};
use crate::qualifier::QualifierFormat;

// One feature record as found in the input, before any grammar is applied.
struct RawRecord<'a> {
    line: usize,
    header: &'a str,
    body: Vec<(usize, &'a str)>,
}

///
/// Renders and parses feature records in GenBank layout:
///
/// ```text
///      CDS             join(12..78,134..202)
///                      /gene="dnaA"
/// ```
///
/// The key sits at `feature_indent`, the location starts at
/// `qualifier_indent` and wraps after commas, and each qualifier record
/// follows on its own lines.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureFormat {
    config: FormatConfig,
    qualifiers: QualifierFormat,
}

impl Default for FeatureFormat {
    fn default() -> Self {
        FeatureFormat::new(FormatConfig::default())
    }
}

impl FeatureFormat {
    pub fn new(config: FormatConfig) -> Self {
        FeatureFormat {
            qualifiers: QualifierFormat::from(&config),
            config,
        }
    }

    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    /// The qualifier grammar used for the body of each record.
    pub fn qualifier_format(&self) -> &QualifierFormat {
        &self.qualifiers
    }

    pub fn format(&self, feature: &Feature) -> String {
        let mut header = format!("{}{}", " ".repeat(self.config.feature_indent), feature.key);
        if header.len() < self.config.qualifier_indent {
            header = format!("{:<width$}", header, width = self.config.qualifier_indent);
        } else {
            header.push(' ');
        }

        let mut lines = self.wrap_location(header, &feature.location);
        lines.extend(feature.qualifiers.iter().map(|q| self.qualifiers.format(q)));
        lines.join("\n")
    }

    pub fn format_table(&self, table: &FeatureTable) -> String {
        table
            .iter()
            .map(|f| self.format(f))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // Break the rendered location after commas so that no line exceeds the
    // width unless a single piece is already too long.
    fn wrap_location(&self, header: String, location: &Location) -> Vec<String> {
        let prefix = " ".repeat(self.config.qualifier_indent);
        let text = location.to_string();
        let mut lines = Vec::new();
        let mut line = header;
        let mut fresh = true;
        for piece in text.split_inclusive(',') {
            if !fresh && line.len() + piece.len() > self.config.line_width {
                lines.push(std::mem::replace(&mut line, prefix.clone()));
            }
            line.push_str(piece);
            fresh = false;
        }
        lines.push(line);
        lines
    }

    /// Parse exactly one feature record.
    pub fn parse(&self, input: &str) -> FeatureResult<Feature> {
        let [record]: [RawRecord; 1] = self
            .split_records(input)?
            .try_into()
            .map_err(|records: Vec<RawRecord>| FeatureError::RecordCount(records.len()))?;
        self.parse_record(record)
    }

    /// Parse a block of feature records into a table, keeping input order.
    pub fn parse_table(&self, input: &str) -> FeatureResult<FeatureTable> {
        self.split_records(input)?
            .into_iter()
            .map(|record| self.parse_record(record))
            .collect()
    }

    fn is_header(&self, line: &str) -> bool {
        let indent = self.config.feature_indent;
        let bytes = line.as_bytes();
        bytes.len() > indent && bytes[..indent].iter().all(|&b| b == b' ') && bytes[indent] != b' '
    }

    fn split_records<'a>(&self, input: &'a str) -> FeatureResult<Vec<RawRecord<'a>>> {
        let mut records: Vec<RawRecord<'a>> = Vec::new();
        for (idx, line) in input.lines().enumerate() {
            let line_no = idx + 1;
            if line.trim().is_empty() {
                continue;
            }
            if self.is_header(line) {
                records.push(RawRecord {
                    line: line_no,
                    header: line,
                    body: Vec::new(),
                });
                continue;
            }
            match records.last_mut() {
                Some(record) => record.body.push((line_no, line)),
                None => return Err(FeatureError::MissingIndent { line: line_no }),
            }
        }
        Ok(records)
    }

    fn parse_record(&self, record: RawRecord) -> FeatureResult<Feature> {
        let rest = &record.header[self.config.feature_indent..];
        let key_len = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let key = &rest[..key_len];
        let mut location_text = rest[key_len..].trim().to_string();

        let prefix = " ".repeat(self.config.qualifier_indent);
        let mut body = record.body.iter().peekable();
        while let Some(&&(line_no, line)) = body.peek() {
            let Some(stripped) = line.strip_prefix(prefix.as_str()) else {
                return Err(FeatureError::MissingIndent { line: line_no });
            };
            if stripped.starts_with('/') {
                break;
            }
            location_text.push_str(stripped.trim_end());
            body.next();
        }

        if location_text.is_empty() {
            return Err(FeatureError::MissingLocation { line: record.line });
        }
        let location = location_text.parse::<Location>().inspect_err(|e| {
            trace!("feature {} at line {}: {}", key, record.line, e);
        })?;

        let block = body.map(|&(_, line)| line).collect::<Vec<_>>().join("\n");
        let qualifiers = self.qualifiers.parse_block(&block)?;

        Ok(Feature::new(key, location).with_qualifiers(qualifiers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use featloc_core::models::{Qualifier, Qualifiers};
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn range(start: usize, end: usize) -> Location {
        Location::range(start, end).unwrap()
    }

    #[fixture]
    fn narrow() -> FeatureFormat {
        FeatureFormat::new(FormatConfig {
            line_width: 40,
            ..FormatConfig::default()
        })
    }

    #[fixture]
    fn cds() -> Feature {
        let location = Location::join(vec![range(0, 10), range(19, 30), range(39, 50), range(59, 70)]).unwrap();
        let mut qualifiers = Qualifiers::new();
        qualifiers.add("gene", "abc");
        qualifiers.push(Qualifier::literal("codon_start", "1"));
        Feature::new("CDS", location).with_qualifiers(qualifiers)
    }

    #[rstest]
    fn test_format_wraps_location(narrow: FeatureFormat, cds: Feature) {
        let expected = [
            format!("{:<21}join(1..10,20..30,", "     CDS"),
            "                     40..50,60..70)".to_string(),
            "                     /gene=\"abc\"".to_string(),
            "                     /codon_start=1".to_string(),
        ]
        .join("\n");
        assert_eq!(narrow.format(&cds), expected);
    }

    #[rstest]
    fn test_parse_wrapped(narrow: FeatureFormat, cds: Feature) {
        let text = narrow.format(&cds);
        assert_eq!(narrow.parse(&text), Ok(cds));
    }

    #[rstest]
    fn test_long_key() {
        let format = FeatureFormat::default();
        let feature = Feature::new("a_very_long_feature_key", Location::Point(4));
        let text = format.format(&feature);
        assert_eq!(text, "     a_very_long_feature_key 5");
        assert_eq!(format.parse(&text), Ok(feature));
    }

    #[rstest]
    fn test_parse_table() {
        let text = concat!(
            "     source          1..8\n",
            "                     /organism=\"synthetic construct\"\n",
            "                     /mol_type=\"other DNA\"\n",
            "     gene            complement(3..4)\n",
            "                     /pseudo\n",
            "     misc_feature    2^3\n",
        );
        let table = FeatureFormat::default().parse_table(text).unwrap();
        let summary: Vec<String> = table
            .iter()
            .map(|f| format!("{} {} {}", f.key, f.location, f.qualifiers.len()))
            .collect();
        assert_eq!(
            summary,
            vec!["source 1..8 2", "gene complement(3..4) 1", "misc_feature 2^3 0"]
        );
        assert_eq!(format!("{}\n", FeatureFormat::default().format_table(&table)), text);
    }

    #[rstest]
    #[case("", FeatureError::RecordCount(0))]
    #[case("     gene            1..2\n     gene            3..4", FeatureError::RecordCount(2))]
    #[case("                     /gene=\"x\"", FeatureError::MissingIndent { line: 1 })]
    #[case("     gene\n                     /gene=\"x\"", FeatureError::MissingLocation { line: 1 })]
    #[case("     gene            1..2\n  /gene=\"x\"", FeatureError::MissingIndent { line: 2 })]
    fn test_parse_errors(#[case] text: &str, #[case] expected: FeatureError) {
        assert_eq!(FeatureFormat::default().parse(text), Err(expected));
    }

    #[rstest]
    fn test_nested_errors() {
        let format = FeatureFormat::default();
        assert!(matches!(
            format.parse("     gene            1..?"),
            Err(FeatureError::Location(_))
        ));
        assert!(matches!(
            format.parse("     gene            1..2\n                     /gene=x"),
            Err(FeatureError::Qualifier(_))
        ));
    }
}
