/// A syntactic type reference as written in a field declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// `[T]`
    Vector(Box<TypeRef>),
    /// A primitive keyword or a (possibly dotted) definition name.
    Named(String),
}

impl TypeRef {
    pub fn parse(input: &str) -> TypeRef {
        let trimmed = input.trim();
        match trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        {
            Some(inner) => TypeRef::Vector(Box::new(TypeRef::parse(inner))),
            None => TypeRef::Named(trimmed.to_string()),
        }
    }
}
