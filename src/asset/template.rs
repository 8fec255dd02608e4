//! Tag templates with typed slot injection.

const ATTRIBUTES_SLOT: &str = "__ATTRIBUTES__";
const PATH_SLOT: &str = "__PATH__";

/// Two-slot HTML tag template: attributes string and path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagTemplate {
    content: &'static str,
}

impl TagTemplate {
    /// `content` must contain `__ATTRIBUTES__` and `__PATH__`.
    pub const fn new(content: &'static str) -> Self {
        Self { content }
    }

    /// Fill both slots in one pass. Only the template text is searched, so
    /// slot markers inside `attributes` or `path` come out verbatim.
    pub fn render(&self, attributes: &str, path: &str) -> String {
        let mut out = String::with_capacity(self.content.len() + attributes.len() + path.len());
        let mut rest = self.content;
        loop {
            let next = [(ATTRIBUTES_SLOT, attributes), (PATH_SLOT, path)]
                .into_iter()
                .filter_map(|(slot, value)| rest.find(slot).map(|at| (at, slot, value)))
                .min_by_key(|(at, _, _)| *at);
            let Some((at, slot, value)) = next else {
                break;
            };
            out.push_str(&rest[..at]);
            out.push_str(value);
            rest = &rest[at + slot.len()..];
        }
        out.push_str(rest);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_slots() {
        let template = TagTemplate::new("<x __ATTRIBUTES__src=\"__PATH__\"></x>");
        assert_eq!(
            template.render("async=\"async\" ", "/a.js"),
            "<x async=\"async\" src=\"/a.js\"></x>"
        );
        assert_eq!(template.render("", "/a.js"), "<x src=\"/a.js\"></x>");
    }

    #[test]
    fn test_path_is_not_treated_as_slot() {
        let template = TagTemplate::new("<x __ATTRIBUTES__src=\"__PATH__\">");
        assert_eq!(
            template.render("", "/__ATTRIBUTES__.js"),
            "<x src=\"/__ATTRIBUTES__.js\">"
        );
    }

    #[test]
    fn test_attribute_values_are_not_treated_as_slots() {
        let template = TagTemplate::new("<x __ATTRIBUTES__src=\"__PATH__\"></x>");
        assert_eq!(
            template.render("title=\"__PATH__\" ", "/a.js"),
            "<x title=\"__PATH__\" src=\"/a.js\"></x>"
        );
    }
}
