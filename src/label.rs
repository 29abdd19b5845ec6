use std::collections::HashMap;

use crate::region::Line;

/// Label names mapped to the index of the line that declares them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Labels {
  targets: HashMap<String, usize>,
}

impl Labels {
  /// Scans `lines` once, a label declared twice resolves to its last line.
  pub fn resolve<S>(lines: &[S]) -> Self
  where
    S: AsRef<str>,
  {
    let mut targets = HashMap::new();
    for (index, line) in lines.iter().enumerate() {
      if let Line::Label(name) = Line::parse(line.as_ref()) {
        if let Some(previous) = targets.insert(name.to_owned(), index) {
          log::debug!("label `{name}` on line {previous} redeclared on line {index}");
        }
      }
    }
    Self { targets }
  }

  pub fn get(&self, name: &str) -> Option<usize> {
    self.targets.get(name).copied()
  }

  pub fn len(&self) -> usize {
    self.targets.len()
  }

  pub fn is_empty(&self) -> bool {
    self.targets.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
    self.targets.iter().map(|(name, &index)| (name.as_str(), index))
  }
}
