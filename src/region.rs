use crate::label::Labels;

/// A region of source lines the machine can execute
pub trait Region {
  fn lines(&self) -> &[String];

  /// The index of the line declaring `label`
  fn label(&self, label: &str) -> Option<usize>;
}

/// A whole program: its trimmed lines plus the labels declared in them.
///
/// Built once and never modified afterwards.
#[derive(Debug, Clone, Default)]
pub struct Program {
  lines: Vec<String>,
  labels: Labels,
}

impl Program {
  pub fn new(lines: Vec<String>) -> Self {
    let lines: Vec<String> = lines
      .into_iter()
      .map(|line| line.trim().to_owned())
      .collect();
    let labels = Labels::resolve(&lines);
    log::debug!("loaded {} lines, {} labels", lines.len(), labels.len());
    Self { lines, labels }
  }

  pub fn labels(&self) -> &Labels {
    &self.labels
  }

  pub fn len(&self) -> usize {
    self.lines.len()
  }

  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }
}

impl From<&str> for Program {
  fn from(source: &str) -> Self {
    Self::new(source.lines().map(str::to_owned).collect())
  }
}

impl From<Vec<String>> for Program {
  fn from(lines: Vec<String>) -> Self {
    Self::new(lines)
  }
}

impl Region for Program {
  fn lines(&self) -> &[String] {
    &self.lines
  }

  fn label(&self, label: &str) -> Option<usize> {
    self.labels.get(label)
  }
}

/// What a single source line turns out to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
  Blank,
  /// `name:`, anything after the first token is ignored
  Label(&'a str),
  Code {
    keyword: &'a str,
    args: Vec<&'a str>,
  },
}

impl<'a> Line<'a> {
  pub fn parse(line: &'a str) -> Self {
    let mut tokens = line.split_whitespace();
    let Some(keyword) = tokens.next() else {
      return Line::Blank;
    };
    if let Some(name) = keyword.strip_suffix(':') {
      return Line::Label(name);
    }
    Line::Code {
      keyword,
      args: tokens.collect(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  mod line {
    use super::*;

    #[test]
    fn blank() {
      assert_eq!(Line::parse(""), Line::Blank);
      assert_eq!(Line::parse("   \t"), Line::Blank);
    }

    #[test]
    fn label() {
      assert_eq!(Line::parse("loop:"), Line::Label("loop"));
      assert_eq!(Line::parse("loop: inc a"), Line::Label("loop"));
    }

    #[test]
    fn code() {
      assert_eq!(
        Line::parse("mov 5 a"),
        Line::Code {
          keyword: "mov",
          args: vec!["5", "a"],
        }
      );
      assert_eq!(
        Line::parse("inc   a"),
        Line::Code {
          keyword: "inc",
          args: vec!["a"],
        }
      );
    }
  }

  mod program {
    use super::*;

    #[test]
    fn trims_lines() {
      let program: Program = "  mov 5 a  \n\tprnt a\r\n".into();
      assert_eq!(program.lines(), ["mov 5 a", "prnt a"]);
    }

    #[test]
    fn keeps_blank_lines() {
      let program: Program = "inc a\n\nstart:\n".into();
      assert_eq!(program.len(), 3);
      assert_eq!(program.label("start"), Some(2));
    }

    #[test]
    fn empty() {
      let program: Program = "".into();
      assert!(program.is_empty());
      assert!(program.labels().is_empty());
    }
  }
}
