use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The value of a qualifier, tagged with the syntax it is written in.
///
/// Values keep their physical line breaks as `\n`; the record layer decides
/// how continuation lines are indented.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum QualifierValue {
    /// `"text"`, stored without the surrounding quotes and with `""`
    /// unescaped to `"`.
    Quoted(String),
    /// A bare token such as `3` or `inverted`.
    Literal(String),
    /// A parenthesised expression such as `(pos:34..36,aa:Phe)`, stored with
    /// its parentheses and never parsed further.
    Expression(String),
}

impl QualifierValue {
    pub fn as_str(&self) -> &str {
        match self {
            QualifierValue::Quoted(s) | QualifierValue::Literal(s) | QualifierValue::Expression(s) => s,
        }
    }

    pub fn is_quoted(&self) -> bool {
        matches!(self, QualifierValue::Quoted(_))
    }
}

impl Display for QualifierValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualifierValue::Quoted(s) => write!(f, "\"{}\"", s.replace('"', "\"\"")),
            QualifierValue::Literal(s) | QualifierValue::Expression(s) => f.write_str(s),
        }
    }
}

///
/// How a qualifier is split over physical lines when it is rendered.
///
/// Offsets in [`Layout::Fixed`] are byte offsets into the rendered
/// `/key=value` text at which a folded line ends. Line breaks stored in the
/// value are not listed; they always start a new line.
///
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Layout {
    /// Folded to the line width by the renderer.
    #[default]
    Flow,
    /// The layout the record was read with, reproduced as is.
    Fixed(Vec<usize>),
}

/// A single `/key` or `/key=value` annotation.
///
/// Equality and hashing look at the key and value only; the layout is
/// presentation.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Qualifier {
    pub key: String,
    pub value: Option<QualifierValue>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub layout: Layout,
}

impl PartialEq for Qualifier {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.value == other.value
    }
}

impl Eq for Qualifier {}

impl Hash for Qualifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
        self.value.hash(state);
    }
}

impl Qualifier {
    pub fn new(key: impl Into<String>, value: Option<QualifierValue>) -> Self {
        Qualifier {
            key: key.into(),
            value,
            layout: Layout::Flow,
        }
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn flag(key: impl Into<String>) -> Self {
        Qualifier::new(key, None)
    }

    pub fn quoted(key: impl Into<String>, text: impl Into<String>) -> Self {
        Qualifier::new(key, Some(QualifierValue::Quoted(text.into())))
    }

    pub fn literal(key: impl Into<String>, text: impl Into<String>) -> Self {
        Qualifier::new(key, Some(QualifierValue::Literal(text.into())))
    }

    pub fn expression(key: impl Into<String>, text: impl Into<String>) -> Self {
        Qualifier::new(key, Some(QualifierValue::Expression(text.into())))
    }

    pub fn is_flag(&self) -> bool {
        self.value.is_none()
    }

    /// Text of the value, if any.
    pub fn text(&self) -> Option<&str> {
        self.value.as_ref().map(QualifierValue::as_str)
    }
}

impl Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            None => write!(f, "/{}", self.key),
            Some(value) => write!(f, "/{}={}", self.key, value),
        }
    }
}

///
/// Qualifiers of one feature, in insertion order. Keys may repeat.
///
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Qualifiers(Vec<Qualifier>);

impl Qualifiers {
    pub fn new() -> Self {
        Qualifiers(Vec::new())
    }

    pub fn push(&mut self, qualifier: Qualifier) {
        self.0.push(qualifier);
    }

    /// Append a quoted value.
    pub fn add(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.push(Qualifier::quoted(key, text));
    }

    pub fn add_flag(&mut self, key: impl Into<String>) {
        self.push(Qualifier::flag(key));
    }

    /// First qualifier with the given key.
    pub fn get(&self, key: &str) -> Option<&Qualifier> {
        self.0.iter().find(|q| q.key == key)
    }

    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Qualifier> + 'a {
        self.0.iter().filter(move |q| q.key == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove every qualifier with the given key, returning them in order.
    pub fn remove(&mut self, key: &str) -> Vec<Qualifier> {
        let (removed, kept): (Vec<Qualifier>, Vec<Qualifier>) = std::mem::take(&mut self.0)
            .into_iter()
            .partition(|q| q.key == key);
        self.0 = kept;
        removed
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Qualifier> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Qualifier>> for Qualifiers {
    fn from(value: Vec<Qualifier>) -> Self {
        Qualifiers(value)
    }
}

impl FromIterator<Qualifier> for Qualifiers {
    fn from_iter<T: IntoIterator<Item = Qualifier>>(iter: T) -> Self {
        Qualifiers(iter.into_iter().collect())
    }
}

impl IntoIterator for Qualifiers {
    type Item = Qualifier;
    type IntoIter = std::vec::IntoIter<Qualifier>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Qualifiers {
    type Item = &'a Qualifier;
    type IntoIter = std::slice::Iter<'a, Qualifier>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn qualifiers() -> Qualifiers {
        let mut qfs = Qualifiers::new();
        qfs.add("gene", "dnaA");
        qfs.add("note", "first");
        qfs.add_flag("pseudo");
        qfs.push(Qualifier::literal("codon_start", "1"));
        qfs.add("note", "second");
        qfs
    }

    #[rstest]
    #[case(Qualifier::flag("pseudo"), "/pseudo")]
    #[case(Qualifier::quoted("gene", "dnaA"), "/gene=\"dnaA\"")]
    #[case(Qualifier::quoted("note", "say \"hi\""), "/note=\"say \"\"hi\"\"\"")]
    #[case(Qualifier::literal("codon_start", "1"), "/codon_start=1")]
    #[case(Qualifier::expression("anticodon", "(pos:34..36,aa:Phe)"), "/anticodon=(pos:34..36,aa:Phe)")]
    fn test_display(#[case] qualifier: Qualifier, #[case] expected: &str) {
        assert_eq!(qualifier.to_string(), expected);
    }

    #[rstest]
    fn test_lookup(qualifiers: Qualifiers) {
        assert_eq!(qualifiers.len(), 5);
        assert_eq!(qualifiers.get("gene").and_then(Qualifier::text), Some("dnaA"));
        assert!(qualifiers.get("pseudo").unwrap().is_flag());
        assert!(qualifiers.contains_key("codon_start"));
        assert!(!qualifiers.contains_key("product"));

        let notes: Vec<&str> = qualifiers
            .get_all("note")
            .filter_map(Qualifier::text)
            .collect();
        assert_eq!(notes, vec!["first", "second"]);
    }

    #[rstest]
    fn test_layout_is_not_compared() {
        let flowing = Qualifier::quoted("note", "a b");
        let fixed = Qualifier::quoted("note", "a b").with_layout(Layout::Fixed(vec![9]));
        assert_eq!(flowing, fixed);
        assert_ne!(flowing, Qualifier::quoted("note", "a\nb"));
    }

    #[rstest]
    fn test_remove_keeps_order(mut qualifiers: Qualifiers) {
        let removed = qualifiers.remove("note");
        assert_eq!(removed.len(), 2);

        let keys: Vec<&str> = qualifiers.iter().map(|q| q.key.as_str()).collect();
        assert_eq!(keys, vec!["gene", "pseudo", "codon_start"]);
    }
}
