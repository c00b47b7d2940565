// A single CSS property: "color: red"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
}

// input: "color: red; font-size: 12px;"
// output: vec![Declaration { name: "color", value: "red" }, Declaration { name: "font-size", value: "12px" }]
//
// Semicolons inside double quotes do not split (Word writes `mso-level-text:"%1\;"`).
pub fn parse_declarations(input: &str) -> Vec<Declaration> {
    split_outside_quotes(input)
        .into_iter()
        .filter_map(|pair| {
            let (n, v) = pair.split_once(':')?;
            let name = n.trim().to_ascii_lowercase();
            if name.is_empty() {
                return None;
            }
            let value = v.trim().to_string();
            Some(Declaration { name, value })
        })
        .collect()
}

fn split_outside_quotes(input: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;
    for (i, ch) in input.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => {
                parts.push(&input[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&input[start..]);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_declarations_lowercases_names_only() {
        let decls = parse_declarations("MSO-LIST:Ignore; Margin-Left: 36.0pt;");
        assert_eq!(
            decls,
            vec![
                Declaration {
                    name: "mso-list".into(),
                    value: "Ignore".into()
                },
                Declaration {
                    name: "margin-left".into(),
                    value: "36.0pt".into()
                },
            ]
        );
    }

    #[test]
    fn parse_declarations_skips_garbage() {
        let decls = parse_declarations(";;novalue; :x; a:b");
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].name, "a");
    }

    #[test]
    fn parse_declarations_respects_quoted_semicolons() {
        let decls = parse_declarations(r#"mso-level-text:"%1\;"; color:red"#);
        assert_eq!(decls[0].value, r#""%1\;""#);
        assert_eq!(decls[1].name, "color");
    }
}
