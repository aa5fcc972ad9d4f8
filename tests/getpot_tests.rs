//! GetPot reader and writer behavior on whole documents

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "This is a test module")]
mod tests {
    use getpot_tree::config::Config;
    use getpot_tree::getpot::{NEWLINE, SectionPrefix, parse_document, read_document, write_document};
    use getpot_tree::model::{Block, Parameter};
    use getpot_tree::system::MockSystem;
    use regex::Regex;
    use std::path::Path;

    fn nested_sample() -> Block {
        Block::new("Kernels")
            .with_parameter(Parameter::new("active", "'diff rx'").with_required(true))
            .with_subblock(
                Block::new("diff")
                    .with_parameter(Parameter::new("type", "Diffusion"))
                    .with_parameter(Parameter::new("variable", "u")),
            )
            .with_subblock(
                Block::new("rx").with_subblock(
                    Block::new("coupled").with_parameter(Parameter::new("v", "'1 2 3'")),
                ),
            )
    }

    fn lines(text: &str) -> Vec<&str> {
        text.split(NEWLINE).filter(|l| !l.is_empty()).collect()
    }

    #[test]
    fn written_block_reads_back_equal() {
        let block = nested_sample();
        let text = block.to_text(SectionPrefix::TopLevel, false);
        let back = Block::from_text(&lines(&text)).unwrap();

        assert_eq!(back.name, "Kernels");
        assert_eq!(back.parameter("active").unwrap().value, "'diff rx'");
        assert_eq!(back.subblocks.len(), 2);
        assert_eq!(back.subblocks[0].parameter("type").unwrap().value, "Diffusion");
        assert_eq!(back.subblocks[1].subblocks[0].name, "coupled");
        assert_eq!(
            back.subblocks[1].subblocks[0].parameter("v").unwrap().value,
            "'1 2 3'"
        );
    }

    #[test]
    fn comments_follow_header_and_value() {
        let pattern = Regex::new(r"^\s*#? ?(\[dim\]|dim = 2)\s+# the dimension$").unwrap();

        let mut block = Block::new("dim")
            .with_parameter(Parameter::new("dim", "2").with_comment("the dimension"));
        block.comment = "the dimension".to_owned();

        for line in lines(&block.to_text(SectionPrefix::TopLevel, false)) {
            if line != "[]" {
                assert!(pattern.is_match(line), "{line:?}");
            }
        }
    }

    #[test]
    fn inactive_block_is_dropped_or_fully_commented() {
        let mut block = nested_sample();
        block.active = false;

        assert_eq!(block.to_text(SectionPrefix::TopLevel, false), "");
        let text = block.to_text(SectionPrefix::TopLevel, true);
        assert!(!text.is_empty());
        assert!(lines(&text).iter().all(|l| l.starts_with('#')), "{text}");
    }

    #[test]
    fn inactive_block_sits_one_level_left() {
        let mut inner = Block::new("sub").with_parameter(Parameter::new("x", "1"));
        inner.active = false;
        let block = Block::new("Outer").with_subblock(inner);

        let text = block.to_text(SectionPrefix::TopLevel, false);
        assert_eq!(
            lines(&text),
            vec!["[Outer]", "#[./sub]", "#  x = 1", "#[../]", "[]"]
        );
    }

    #[test]
    fn canonical_document_round_trips() {
        let text = [
            "[Variables]",
            "  [./u]",
            "    order = FIRST",
            "  [../]",
            "[]",
            "[Mesh]",
            "  dim = 2",
            "# nx = 10",
            "[]",
            "",
        ]
        .join(NEWLINE);

        let system = MockSystem::new()
            .with_file("/work/input.i", text.as_bytes())
            .unwrap();
        let config = Config::default();
        let nodes = read_document(&system, Path::new("/work/input.i"), &config).unwrap();
        assert_eq!(write_document(&nodes, &config), text);
    }

    #[test]
    fn user_formatted_file_is_normalized() {
        let text = "\
# Heat conduction
[Mesh]
   dim=2
   file = square.e      # the mesh
[]

[Kernels]
  [./diff]
     type = Diffusion
     variable = u
  [../]
[]
";
        let blocks = parse_document(text).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].parameter("dim").unwrap().value, "2");
        assert_eq!(blocks[0].parameter("file").unwrap().comment, "the mesh");
        assert_eq!(blocks[1].subblocks[0].parameters.len(), 2);
    }

    #[test]
    fn same_names_nested_three_deep() {
        let text = "[A]\n[./A]\n[./A]\nk = 1\n[../]\n[../]\nk = 3\n[]\n";
        let blocks = parse_document(text).unwrap();
        let outer = &blocks[0];
        assert_eq!(outer.parameter("k").unwrap().value, "3");
        assert_eq!(outer.subblocks[0].subblocks[0].parameter("k").unwrap().value, "1");
    }

    #[test]
    fn two_line_value_is_joined() {
        let text = "[Functions]\n  [./f]\n    value = 'x +\n      y'\n    type = ParsedFunction\n  [../]\n[]\n";
        let blocks = parse_document(text).unwrap();
        let f = &blocks[0].subblocks[0];
        assert_eq!(f.parameter("value").unwrap().value, "'x + y'");
        assert_eq!(f.parameter("type").unwrap().value, "ParsedFunction");
    }

    #[test]
    fn variables_are_offered_to_kernels() {
        let text = "[Variables]\n[./u]\n[../]\n[./v]\n[../]\n[]\n[Kernels]\n[./k]\nvariable = u\n[../]\n[]\n";
        let system = MockSystem::new().with_file("/i.i", text.as_bytes()).unwrap();

        let nodes = read_document(&system, Path::new("/i.i"), &Config::default()).unwrap();
        let variable = nodes[1].children[0].parameter("variable").unwrap();
        assert_eq!(variable.options, "u v");

        let config = Config {
            bind_variables: false,
            ..Config::default()
        };
        let nodes = read_document(&system, Path::new("/i.i"), &config).unwrap();
        assert!(nodes[1].children[0].parameter("variable").unwrap().options.is_empty());
    }
}
