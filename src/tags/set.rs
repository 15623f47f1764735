use std::collections::BTreeMap;

/// Tag values keyed by canonical lower-case name.
///
/// Canonical names used by the lofty reader:
/// `date` (TDRC / DATE / ©day), `year` (TYER / YEAR), `releasedate` (TDRL),
/// `originaldate` (TDOR / ORIGINALDATE) and `copyright` (TCOP / COPYRIGHT / cprt).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    values: BTreeMap<String, Vec<String>>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value under `name`. Blank values are dropped.
    pub fn insert(&mut self, name: &str, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        self.values
            .entry(name.trim().to_ascii_lowercase())
            .or_default()
            .push(value.to_string());
    }

    pub fn get(&self, name: &str) -> &[String] {
        self.values
            .get(&name.trim().to_ascii_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn first(&self, name: &str) -> Option<&str> {
        self.get(name).first().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for TagSet {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut set = TagSet::new();
        for (name, value) in iter {
            set.insert(name, value);
        }
        set
    }
}
