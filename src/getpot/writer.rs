//! GetPot serialization of blocks

use crate::model::{Block, Parameter};

/// Opening prefix of a nested section name
pub const SECTION_PREFIX: &str = "./";

/// Name used to close a nested section
pub const PARENT_SECTION_PREFIX: &str = "../";

/// Platform-native line ending used on write
pub const NEWLINE: &str = if cfg!(windows) { "\r\n" } else { "\n" };

const INDENT_STEP: &str = "  ";

/// Whether a block is written as a top-level or a nested section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionPrefix {
    /// `[name]` ... `[]`
    TopLevel,
    /// `[./name]` ... `[../]`
    Nested,
}

impl SectionPrefix {
    const fn opening(self) -> &'static str {
        match self {
            Self::TopLevel => "",
            Self::Nested => SECTION_PREFIX,
        }
    }

    const fn closing(self) -> &'static str {
        match self {
            Self::TopLevel => "",
            Self::Nested => PARENT_SECTION_PREFIX,
        }
    }
}

/// Spaces inserted between a line of `line_len` characters and its inline
/// comment so comments line up at columns 30, 45 or 60
#[must_use]
#[inline]
pub const fn comment_padding(line_len: usize) -> usize {
    if line_len < 30 {
        30 - line_len
    } else if line_len < 45 {
        45 - line_len
    } else if line_len < 60 {
        60 - line_len
    } else {
        15
    }
}

impl Block {
    /// Serialize this block and its subblocks.
    ///
    /// An inactive block is omitted unless `write_inactive` is set, in which
    /// case every line it produces is commented out. Subblocks are always
    /// attempted and their own `active` flag decides how they appear.
    #[must_use]
    #[inline]
    pub fn to_text(&self, prefix: SectionPrefix, write_inactive: bool) -> String {
        self.to_text_indented(prefix, write_inactive, "")
    }

    /// Same as [`Block::to_text`] with an initial indent that nested levels
    /// add to
    #[must_use]
    pub fn to_text_indented(&self, prefix: SectionPrefix, write_inactive: bool, indent: &str) -> String {
        let mut out = String::new();
        self.write_section(&mut out, prefix, write_inactive, indent, false);
        out
    }

    fn write_section(
        &self,
        out: &mut String,
        prefix: SectionPrefix,
        write_inactive: bool,
        parent_indent: &str,
        inside_commented: bool,
    ) {
        let commented = !self.active || inside_commented;
        if commented && !write_inactive {
            return;
        }

        let indent = match prefix {
            SectionPrefix::TopLevel => parent_indent.to_owned(),
            SectionPrefix::Nested => format!("{parent_indent}{INDENT_STEP}"),
        };
        // The '#' replaces the last indent step; a top-level section has no
        // step to give up, so its '#' is prepended
        let lead = if commented {
            format!("#{}", indent.strip_prefix(INDENT_STEP).unwrap_or(""))
        } else {
            indent.clone()
        };

        push_line(
            out,
            format!("{lead}[{}{}]", prefix.opening(), self.name),
            &self.comment,
        );

        for parameter in &self.parameters {
            push_line(out, parameter_line(parameter, &indent, &lead, commented), &parameter.comment);
        }

        for subblock in &self.subblocks {
            subblock.write_section(out, SectionPrefix::Nested, true, &indent, commented);
        }

        out.push_str(&format!("{lead}[{}]", prefix.closing()));
        out.push_str(NEWLINE);
    }
}

fn parameter_line(parameter: &Parameter, indent: &str, lead: &str, block_commented: bool) -> String {
    let fragment = parameter.to_getpot_fragment();
    if block_commented {
        format!("{lead}{INDENT_STEP}{fragment}")
    } else if parameter.required || parameter.enabled {
        format!("{indent}{INDENT_STEP}{fragment}")
    } else {
        format!("{indent}# {fragment}")
    }
}

fn push_line(out: &mut String, line: String, comment: &str) {
    let comment: String = comment.chars().filter(|c| *c != '\n' && *c != '\r').collect();
    let comment = comment.trim();

    out.push_str(&line);
    if !comment.is_empty() {
        let padding = comment_padding(line.chars().count());
        out.push_str(&" ".repeat(padding));
        out.push_str("# ");
        out.push_str(comment);
    }
    out.push_str(NEWLINE);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    #[test]
    fn writes_required_parameter_of_top_level_block() {
        let block = Block::new("Mesh")
            .with_parameter(Parameter::new("type", "generated").with_required(true));
        assert_eq!(
            block.to_text(SectionPrefix::TopLevel, false),
            format!("[Mesh]{NEWLINE}  type = generated{NEWLINE}[]{NEWLINE}")
        );
    }

    #[test]
    fn empty_block_is_an_empty_section() {
        let text = Block::new("Outputs").to_text(SectionPrefix::TopLevel, false);
        assert_eq!(lines(&text), vec!["[Outputs]", "[]"]);
    }

    #[test]
    fn disabled_parameters_are_commented() {
        let block = Block::new("Executioner")
            .with_parameter(Parameter::new("type", "Steady"))
            .with_parameter(Parameter::new("l_tol", "1e-5").with_enabled(false));
        let text = block.to_text(SectionPrefix::TopLevel, false);
        assert_eq!(
            lines(&text),
            vec!["[Executioner]", "  type = Steady", "# l_tol = 1e-5", "[]"]
        );
    }

    #[test]
    fn nested_sections_indent_two_spaces_per_level() {
        let block = Block::new("Kernels").with_subblock(
            Block::new("diff")
                .with_parameter(Parameter::new("type", "Diffusion"))
                .with_subblock(Block::new("inner").with_parameter(Parameter::new("x", "1"))),
        );
        let text = block.to_text(SectionPrefix::TopLevel, false);
        assert_eq!(
            lines(&text),
            vec![
                "[Kernels]",
                "  [./diff]",
                "    type = Diffusion",
                "    [./inner]",
                "      x = 1",
                "    [../]",
                "  [../]",
                "[]",
            ]
        );
    }

    #[test]
    fn inactive_block_is_skipped_or_commented() {
        let mut block = Block::new("BCs").with_parameter(Parameter::new("boundary", "left"));
        block.active = false;

        assert_eq!(block.to_text(SectionPrefix::TopLevel, false), "");

        let text = block.to_text(SectionPrefix::TopLevel, true);
        assert!(!text.is_empty());
        assert!(lines(&text).iter().all(|l| l.starts_with('#')));
        assert_eq!(lines(&text), vec!["#[BCs]", "#  boundary = left", "#[]"]);
    }

    #[test]
    fn inactive_subblock_sits_one_column_left() {
        let mut child = Block::new("right").with_parameter(Parameter::new("value", "1"));
        child.active = false;
        let block = Block::new("BCs")
            .with_subblock(Block::new("left").with_parameter(Parameter::new("value", "0")))
            .with_subblock(child);

        let text = block.to_text(SectionPrefix::TopLevel, false);
        assert_eq!(
            lines(&text),
            vec![
                "[BCs]",
                "  [./left]",
                "    value = 0",
                "  [../]",
                "#[./right]",
                "#  value = 1",
                "#[../]",
                "[]",
            ]
        );
    }

    #[test]
    fn descendants_of_commented_block_are_commented() {
        let mut block = Block::new("Materials")
            .with_subblock(Block::new("steel").with_parameter(Parameter::new("k", "40")));
        block.active = false;
        let text = block.to_text(SectionPrefix::TopLevel, true);
        assert!(lines(&text).iter().all(|l| l.starts_with('#')));
    }

    #[test]
    fn comments_align_to_columns() {
        assert_eq!(comment_padding(10), 20);
        assert_eq!(comment_padding(30), 15);
        assert_eq!(comment_padding(44), 1);
        assert_eq!(comment_padding(59), 1);
        assert_eq!(comment_padding(60), 15);
        assert_eq!(comment_padding(200), 15);

        let mut block = Block::new("Mesh")
            .with_parameter(Parameter::new("dim", "2").with_comment("spatial\ndimension"));
        block.comment = "the mesh".to_owned();
        let text = block.to_text(SectionPrefix::TopLevel, false);
        let written = lines(&text);
        assert_eq!(written[0], format!("[Mesh]{}# the mesh", " ".repeat(24)));
        assert_eq!(written[1], format!("  dim = 2{}# spatialdimension", " ".repeat(21)));
    }

    #[test]
    fn initial_indent_is_accumulated() {
        let block = Block::new("sub").with_parameter(Parameter::new("a", "b"));
        let text = block.to_text_indented(SectionPrefix::Nested, false, "  ");
        assert_eq!(lines(&text), vec!["    [./sub]", "      a = b", "    [../]"]);
    }
}
