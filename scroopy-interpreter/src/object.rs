use std::collections::HashMap;
use std::fmt::Display;
use std::rc::Rc;

use crate::environment::Environment;
use scroopy_core::ast;

use thiserror::Error;

#[derive(Debug, PartialEq, Clone)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    String(Rc<str>),
    Array(Vec<Rc<Object>>),
    Hash(HashMap<HashKey, (Rc<Object>, Rc<Object>)>),
    Function(Function),
    BuiltinFunction(BuiltinFunction),
    Null,
}

/// Runtime type tag, as shown in error messages.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ObjectType {
    Integer,
    Boolean,
    String,
    Array,
    Hash,
    Function,
    Builtin,
    Null,
}

impl Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ObjectType::*;
        f.write_str(match self {
            Integer => "INTEGER",
            Boolean => "BOOLEAN",
            String => "STRING",
            Array => "ARRAY",
            Hash => "HASH",
            Function => "FUNCTION",
            Builtin => "BUILTIN",
            Null => "NULL",
        })
    }
}

/// Structural key of a hashable object. Keys of different types never
/// compare equal, so `1` and `true` are distinct keys.
#[derive(Debug, PartialEq, Clone, Eq, Hash)]
pub enum HashKey {
    Integer(i64),
    Boolean(bool),
    String(Rc<str>),
}

thread_local! {
    static NULL: Rc<Object> = Rc::new(Object::Null);
    static TRUE: Rc<Object> = Rc::new(Object::Boolean(true));
    static FALSE: Rc<Object> = Rc::new(Object::Boolean(false));
}

impl Object {
    pub fn null() -> Rc<Object> {
        NULL.with(|x| x.clone())
    }
    pub fn boolean(value: bool) -> Rc<Object> {
        if value {
            TRUE.with(|x| x.clone())
        } else {
            FALSE.with(|x| x.clone())
        }
    }
    pub fn integer(value: i64) -> Rc<Object> {
        Rc::new(Object::Integer(value))
    }
    pub fn string(value: impl Into<Rc<str>>) -> Rc<Object> {
        Rc::new(Object::String(value.into()))
    }
    pub fn array(array: Vec<Rc<Object>>) -> Rc<Object> {
        Rc::new(Object::Array(array))
    }
    pub fn hash(hash: HashMap<HashKey, (Rc<Object>, Rc<Object>)>) -> Rc<Object> {
        Rc::new(Object::Hash(hash))
    }
    pub fn function(
        parameters: Vec<ast::Identifier>,
        body: Rc<ast::BlockStatement>,
        env: Environment,
    ) -> Rc<Object> {
        Rc::new(Object::Function(Function {
            parameters,
            body,
            env,
        }))
    }
    pub fn builtin_function(func: BuiltinFunction) -> Rc<Object> {
        Rc::new(Object::BuiltinFunction(func))
    }

    pub fn type_tag(&self) -> ObjectType {
        match self {
            Object::Integer(_) => ObjectType::Integer,
            Object::Boolean(_) => ObjectType::Boolean,
            Object::String(_) => ObjectType::String,
            Object::Array(_) => ObjectType::Array,
            Object::Hash(_) => ObjectType::Hash,
            Object::Function(_) => ObjectType::Function,
            Object::BuiltinFunction(_) => ObjectType::Builtin,
            Object::Null => ObjectType::Null,
        }
    }

    /// Only `null` and `false` are falsy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Null | Object::Boolean(false))
    }
}

impl TryFrom<&Object> for HashKey {
    type Error = EvaluationError;

    fn try_from(value: &Object) -> Result<Self, Self::Error> {
        match value {
            Object::Integer(int) => Ok(HashKey::Integer(*int)),
            Object::String(str) => Ok(HashKey::String(str.clone())),
            Object::Boolean(bool) => Ok(HashKey::Boolean(*bool)),
            other => Err(EvaluationError::UnusableHashKey(other.type_tag())),
        }
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{}", value),
            Object::Boolean(value) => write!(f, "{}", value),
            Object::String(value) => write!(f, "{}", value),
            Object::Null => write!(f, "null"),
            Object::Array(elements) => {
                write!(f, "[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                write!(f, "]")
            }
            Object::Hash(hash) => {
                write!(f, "{{")?;
                for (i, (key, value)) in hash.values().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
            Object::Function(function) => {
                write!(f, "fn(")?;
                for (i, parameter) in function.parameters.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", parameter)?;
                }
                write!(f, ") {{ {} }}", function.body)
            }
            Object::BuiltinFunction(_) => write!(f, "builtin function"),
        }
    }
}

/// A closure. `env` is shared with the scope the literal was evaluated in, so
/// later bindings in that scope are visible to the body.
#[derive(Clone)]
pub struct Function {
    pub parameters: Vec<ast::Identifier>,
    pub body: Rc<ast::BlockStatement>,
    pub env: Environment,
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.parameters == other.parameters
            && Rc::ptr_eq(&self.body, &other.body)
            && self.env.ptr_eq(&other.env)
    }
}

impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .field("ptr", &Rc::as_ptr(&self.body))
            .finish()
    }
}

#[derive(Clone)]
pub struct BuiltinFunction {
    pub name: &'static str,
    pub func: fn(Vec<Rc<Object>>) -> Result<Rc<Object>, EvaluationError>,
}

impl PartialEq for BuiltinFunction {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl std::fmt::Debug for BuiltinFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuiltinFunction")
            .field("name", &self.name)
            .finish()
    }
}

/// Early exit from a statement sequence. `Return` is unwrapped at the nearest
/// call boundary (or the program root); `Error` propagates to the host.
#[derive(Debug, PartialEq)]
pub enum Signal {
    Return(Rc<Object>),
    Error(EvaluationError),
}

impl From<EvaluationError> for Signal {
    fn from(error: EvaluationError) -> Self {
        Signal::Error(error)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum EvaluationError {
    #[error("identifier not found: {0}")]
    UnknownIdentifier(Rc<str>),
    #[error("type mismatch: {left} {operation} {right}")]
    TypeMismatch {
        left: ObjectType,
        operation: ast::InfixOperationKind,
        right: ObjectType,
    },
    #[error("unknown operator: {left} {operation} {right}")]
    UnknownInfixOperator {
        left: ObjectType,
        operation: ast::InfixOperationKind,
        right: ObjectType,
    },
    #[error("unknown operator: {operation}{right}")]
    UnknownPrefixOperator {
        operation: ast::PrefixOperationKind,
        right: ObjectType,
    },
    #[error("division by zero: {0} / 0")]
    DivisionByZero(i64),
    #[error("wrong number of arguments. got={actual}, want={expected}")]
    WrongArgumentCount { expected: usize, actual: usize },
    #[error("not a function: {0}")]
    NotAFunction(ObjectType),
    #[error("index operator not supported: {0}")]
    IndexNotSupported(ObjectType),
    #[error("unusable as hash key: {0}")]
    UnusableHashKey(ObjectType),
    #[error("argument to `{function}` not supported, got {got}")]
    UnsupportedArgument {
        function: &'static str,
        got: ObjectType,
    },
    #[error("argument to `{function}` must be {expected}, got {got}")]
    UnexpectedArgumentType {
        function: &'static str,
        expected: ObjectType,
        got: ObjectType,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_hash_keys() {
        let hello1 = HashKey::try_from(&Object::String("Hello World".into()));
        let hello2 = HashKey::try_from(&Object::String("Hello World".into()));
        let diff = HashKey::try_from(&Object::String("My name is johnny".into()));
        assert_eq!(hello1, hello2);
        assert_ne!(hello1, diff);

        let one = HashKey::try_from(&Object::Integer(1));
        let truth = HashKey::try_from(&Object::Boolean(true));
        assert_ne!(one, truth);
        assert_ne!(
            HashKey::try_from(&Object::Integer(0)),
            HashKey::try_from(&Object::Boolean(false))
        );

        assert_eq!(
            HashKey::try_from(&Object::Null),
            Err(EvaluationError::UnusableHashKey(ObjectType::Null))
        );
    }

    #[test]
    fn test_display() {
        let tests = vec![
            (Object::integer(-12), "-12"),
            (Object::boolean(true), "true"),
            (Object::null(), "null"),
            (Object::string("plain text"), "plain text"),
            (
                Object::array(vec![
                    Object::integer(1),
                    Object::string("two"),
                    Object::array(vec![]),
                ]),
                "[1, two, []]",
            ),
        ];

        for (object, expected) in tests {
            assert_eq!(object.to_string(), expected);
        }

        let mut pairs = HashMap::new();
        pairs.insert(
            HashKey::String("a".into()),
            (Object::string("a"), Object::integer(1)),
        );
        assert_eq!(Object::hash(pairs).to_string(), "{a: 1}");
    }

    #[test]
    fn test_truthiness() {
        assert!(!Object::null().is_truthy());
        assert!(!Object::boolean(false).is_truthy());
        assert!(Object::boolean(true).is_truthy());
        assert!(Object::integer(0).is_truthy());
        assert!(Object::string("").is_truthy());
        assert!(Object::array(vec![]).is_truthy());
    }

    #[test]
    fn test_shared_boolean_instances() {
        assert!(Rc::ptr_eq(&Object::boolean(true), &Object::boolean(true)));
        assert!(Rc::ptr_eq(&Object::null(), &Object::null()));
        assert_eq!(*Object::boolean(false), Object::Boolean(false));
    }
}
