//! Parameter schema discovery.
//!
//! The schema is built once, at load time, by scanning kernel text for
//! declarations of the shape `uniform <type> <name>`. Only the five
//! recognised types enter the schema; other declarations (matrices,
//! integers, ...) are ignored.

use indexmap::IndexMap;

use fluidic_core::ParamType;

const KEYWORD: &[u8] = b"uniform";

/// Declared parameters of a kernel: name → semantic type.
///
/// Immutable after construction. A later declaration of the same name
/// overwrites the earlier one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParamSchema {
    params: IndexMap<String, ParamType>,
}

impl ParamSchema {
    /// Scan `source` for parameter declarations.
    ///
    /// The keyword matches case-insensitively and must be followed by one
    /// or more spaces, a type token, one or more spaces, and a name token.
    /// Tokens are runs of ASCII letters and digits.
    pub fn parse(source: &str) -> Self {
        let bytes = source.as_bytes();
        let mut params = IndexMap::new();
        let mut pos = 0;

        while let Some(offset) = find_keyword(&bytes[pos..]) {
            pos += offset + KEYWORD.len();

            let Some((ty, after_ty)) = token_after_spaces(source, pos) else {
                continue;
            };
            let Some((name, after_name)) = token_after_spaces(source, after_ty) else {
                continue;
            };
            if let Some(param_type) = ParamType::from_glsl(ty) {
                params.insert(name.to_string(), param_type);
            }
            pos = after_name;
        }

        Self { params }
    }

    /// Build a schema from an explicit list of declarations.
    pub fn from_declarations<'a>(decls: impl IntoIterator<Item = (&'a str, ParamType)>) -> Self {
        Self {
            params: decls
                .into_iter()
                .map(|(name, ty)| (name.to_string(), ty))
                .collect(),
        }
    }

    /// The declared type of a parameter.
    pub fn get(&self, name: &str) -> Option<ParamType> {
        self.params.get(name).copied()
    }

    /// Whether a parameter is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Number of declared parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether no parameters are declared.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// All declarations in first-declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ParamType)> {
        self.params.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

fn find_keyword(haystack: &[u8]) -> Option<usize> {
    haystack
        .windows(KEYWORD.len())
        .position(|w| w.eq_ignore_ascii_case(KEYWORD))
}

/// Skip one or more spaces at `start`, then read an alphanumeric token.
/// Returns the token and the index just past it.
fn token_after_spaces(source: &str, start: usize) -> Option<(&str, usize)> {
    let bytes = source.as_bytes();
    let mut i = start;
    while i < bytes.len() && bytes[i] == b' ' {
        i += 1;
    }
    if i == start {
        return None;
    }
    let token_start = i;
    while i < bytes.len() && bytes[i].is_ascii_alphanumeric() {
        i += 1;
    }
    if i == token_start {
        return None;
    }
    Some((&source[token_start..i], i))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_exactly_declared_params() {
        let schema = ParamSchema::parse(
            "precision mediump float;\nuniform vec3 foo;\nuniform sampler2D bar;\nvoid main() {}",
        );
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.get("foo"), Some(ParamType::Vec3));
        assert_eq!(schema.get("bar"), Some(ParamType::Sampler2D));
    }

    #[test]
    fn later_duplicate_overwrites() {
        let schema = ParamSchema::parse("uniform float x;\nuniform vec2 x;");
        assert_eq!(schema.len(), 1);
        assert_eq!(schema.get("x"), Some(ParamType::Vec2));
    }

    #[test]
    fn unknown_types_are_ignored() {
        let schema = ParamSchema::parse(
            "uniform mat4 projectionMatrix;\nuniform int count;\nuniform vec4 colour;",
        );
        assert_eq!(schema.len(), 1);
        assert!(!schema.contains("projectionMatrix"));
        assert!(!schema.contains("count"));
        assert_eq!(schema.get("colour"), Some(ParamType::Vec4));
    }

    #[test]
    fn keyword_is_case_insensitive() {
        let schema = ParamSchema::parse("UNIFORM float alpha;");
        assert_eq!(schema.get("alpha"), Some(ParamType::Float));
    }

    #[test]
    fn requires_space_separation() {
        let schema = ParamSchema::parse("uniform\tfloat a;\nuniformfloat b;\nuniform  float   c;");
        assert!(!schema.contains("a"));
        assert!(!schema.contains("b"));
        assert_eq!(schema.get("c"), Some(ParamType::Float));
    }

    #[test]
    fn declarations_are_found_anywhere_in_the_text() {
        let schema = ParamSchema::parse("uniform vec3 d; uniform float alpha; uniform float beta;");
        let names: Vec<&str> = schema.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["d", "alpha", "beta"]);
    }

    #[test]
    fn truncated_declaration_is_skipped() {
        let schema = ParamSchema::parse("uniform vec3");
        assert!(schema.is_empty());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_type() -> impl Strategy<Value = ParamType> {
            prop_oneof![
                Just(ParamType::Float),
                Just(ParamType::Vec2),
                Just(ParamType::Vec3),
                Just(ParamType::Vec4),
                Just(ParamType::Sampler2D),
            ]
        }

        proptest! {
            #[test]
            fn last_declaration_wins(
                decls in proptest::collection::vec(("[a-z][a-z0-9]{0,6}", arb_type()), 0..24),
            ) {
                let text: String = decls
                    .iter()
                    .map(|(name, ty)| format!("uniform {} {};\n", ty.glsl_name(), name))
                    .collect();
                let schema = ParamSchema::parse(&text);

                let mut expected: IndexMap<String, ParamType> = IndexMap::new();
                for (name, ty) in &decls {
                    expected.insert(name.clone(), *ty);
                }
                prop_assert_eq!(schema.len(), expected.len());
                for (name, ty) in &expected {
                    prop_assert_eq!(schema.get(name), Some(*ty));
                }
            }
        }
    }
}
