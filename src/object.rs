//! Document object model seam.
//!
//! Fonts read persisted dictionaries through [`ObjectStore::resolve`] and publish
//! synthesized descriptors through [`ObjectStore::register`]. The document layer
//! owns the real store; [`MemoryStore`] is the in-memory implementation.

use std::collections::HashMap;

use crate::error::{Error, Result};

/// Dictionary payload shared by dictionaries and streams.
pub type Dict = HashMap<String, Object>;

/// PDF object representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// Null object
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// Real (floating-point) value
    Real(f64),
    /// String (byte array)
    String(Vec<u8>),
    /// Name (without the leading /)
    Name(String),
    /// Array of objects
    Array(Vec<Object>),
    /// Dictionary (key-value pairs)
    Dictionary(Dict),
    /// Stream (dictionary + decoded data)
    Stream {
        /// Stream dictionary
        dict: Dict,
        /// Stream data
        data: bytes::Bytes,
    },
    /// Indirect object reference
    Reference(ObjectRef),
}

/// Reference to an indirect object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectRef {
    /// Object number
    pub id: u32,
    /// Generation number
    pub gen: u16,
}

impl ObjectRef {
    /// Create a new object reference.
    pub fn new(id: u32, gen: u16) -> Self {
        Self { id, gen }
    }
}

impl std::fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} R", self.id, self.gen)
    }
}

impl Object {
    /// Get the type name of this object (without data).
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Null => "Null",
            Object::Boolean(_) => "Boolean",
            Object::Integer(_) => "Integer",
            Object::Real(_) => "Real",
            Object::String(_) => "String",
            Object::Name(_) => "Name",
            Object::Array(_) => "Array",
            Object::Dictionary(_) => "Dictionary",
            Object::Stream { .. } => "Stream",
            Object::Reference(_) => "Reference",
        }
    }

    /// Build a name object.
    pub fn name(name: impl Into<String>) -> Self {
        Object::Name(name.into())
    }

    /// Build a stream object from raw data, setting `/Length`.
    pub fn stream(mut dict: Dict, data: impl Into<bytes::Bytes>) -> Self {
        let data = data.into();
        dict.insert("Length".to_string(), Object::Integer(data.len() as i64));
        Object::Stream { dict, data }
    }

    /// Try to cast to integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Object::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric value of an integer or real.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Object::Integer(i) => Some(*i as f64),
            Object::Real(r) => Some(*r),
            _ => None,
        }
    }

    /// Try to cast to name.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Object::Name(s) => Some(s),
            _ => None,
        }
    }

    /// Try to cast to dictionary. Works for both Dictionary and Stream objects.
    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Object::Dictionary(d) => Some(d),
            Object::Stream { dict, .. } => Some(dict),
            _ => None,
        }
    }

    /// Try to cast to array.
    pub fn as_array(&self) -> Option<&Vec<Object>> {
        match self {
            Object::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Try to cast to reference.
    pub fn as_reference(&self) -> Option<ObjectRef> {
        match self {
            Object::Reference(r) => Some(*r),
            _ => None,
        }
    }

    /// Try to cast to string (bytes).
    pub fn as_string(&self) -> Option<&[u8]> {
        match self {
            Object::String(s) => Some(s),
            _ => None,
        }
    }

    /// Stream payload.
    pub fn stream_data(&self) -> Option<&[u8]> {
        match self {
            Object::Stream { data, .. } => Some(data),
            _ => None,
        }
    }
}

/// Access to the document's indirect objects.
pub trait ObjectStore {
    /// Look up an indirect object.
    fn resolve(&self, reference: ObjectRef) -> Option<Object>;

    /// Add a new indirect object and return its reference.
    fn register(&mut self, object: Object) -> ObjectRef;

    /// Follow a reference if `object` is one, otherwise return it unchanged.
    fn follow(&self, object: &Object) -> Result<Object> {
        match object {
            Object::Reference(r) => self.resolve(*r).ok_or(Error::ObjectNotFound(*r)),
            other => Ok(other.clone()),
        }
    }

    /// Resolve `key` in `dict`, following one level of indirection.
    fn get(&self, dict: &Dict, key: &str) -> Option<Object> {
        dict.get(key).and_then(|obj| self.follow(obj).ok())
    }

    /// Resolve `key` in `dict` and require a dictionary (or stream dictionary).
    fn get_dict(&self, dict: &Dict, key: &str) -> Result<Option<Dict>> {
        match self.get(dict, key) {
            None | Some(Object::Null) => Ok(None),
            Some(obj) => obj.as_dict().cloned().map(Some).ok_or_else(|| Error::InvalidObjectType {
                expected: "Dictionary".to_string(),
                found: obj.type_name().to_string(),
            }),
        }
    }
}

/// In-memory object store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: HashMap<ObjectRef, Object>,
    next_id: u32,
}

impl MemoryStore {
    /// Create an empty store. Object numbers start at 1.
    pub fn new() -> Self {
        Self {
            objects: HashMap::new(),
            next_id: 1,
        }
    }

    /// Number of registered objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the store holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl ObjectStore for MemoryStore {
    fn resolve(&self, reference: ObjectRef) -> Option<Object> {
        self.objects.get(&reference).cloned()
    }

    fn register(&mut self, object: Object) -> ObjectRef {
        let reference = ObjectRef::new(self.next_id.max(1), 0);
        self.next_id = reference.id + 1;
        self.objects.insert(reference, object);
        reference
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_ref_display() {
        assert_eq!(format!("{}", ObjectRef::new(12, 0)), "12 0 R");
    }

    #[test]
    fn test_memory_store_register_resolve() {
        let mut store = MemoryStore::new();
        let a = store.register(Object::Integer(5));
        let b = store.register(Object::name("Identity-H"));
        assert_eq!(a, ObjectRef::new(1, 0));
        assert_eq!(b, ObjectRef::new(2, 0));
        assert_eq!(store.resolve(a), Some(Object::Integer(5)));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_follow_reference() {
        let mut store = MemoryStore::new();
        let r = store.register(Object::Real(1.5));
        assert_eq!(store.follow(&Object::Reference(r)).unwrap(), Object::Real(1.5));
        assert!(store.follow(&Object::Reference(ObjectRef::new(99, 0))).is_err());
    }

    #[test]
    fn test_stream_sets_length() {
        let obj = Object::stream(Dict::new(), b"abc".to_vec());
        assert_eq!(obj.as_dict().unwrap().get("Length"), Some(&Object::Integer(3)));
        assert_eq!(obj.stream_data(), Some(&b"abc"[..]));
    }

    #[test]
    fn test_get_dict_type_mismatch() {
        let store = MemoryStore::new();
        let mut dict = Dict::new();
        dict.insert("FontDescriptor".to_string(), Object::Integer(3));
        assert!(store.get_dict(&dict, "FontDescriptor").is_err());
        assert!(store.get_dict(&dict, "Missing").unwrap().is_none());
    }
}
