//! Symbol classification.

use crate::error::{Result, ScribeError};
use crate::extractors::{Introspectable, ObjectKind};

/// What a reflected object is documented as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolClass {
    Module,
    Class,
    Routine,
}

pub fn is_module<T: Introspectable + ?Sized>(object: &T) -> bool {
    object.kind() == ObjectKind::Module
}

/// Classes, excluding parameterized generic-alias pseudo-classes
pub fn is_class<T: Introspectable + ?Sized>(object: &T) -> bool {
    object.kind() == ObjectKind::Class
}

/// Functions and methods
pub fn is_routine<T: Introspectable + ?Sized>(object: &T) -> bool {
    matches!(object.kind(), ObjectKind::Function | ObjectKind::Method)
}

/// Module members that get their own tree node
pub fn is_documentable_member<T: Introspectable + ?Sized>(object: &T) -> bool {
    is_class(object) || is_routine(object)
}

/// Class members listed under `methods`: plain functions without a leading underscore
pub fn is_public_method<T: Introspectable + ?Sized>(object: &T) -> bool {
    object.kind() == ObjectKind::Method
        && object
            .name()
            .is_some_and(|name| !name.starts_with('_'))
}

/// Classify an object; module is checked first, then class, then routine
pub fn classify<T: Introspectable + ?Sized>(object: &T) -> Result<SymbolClass> {
    if is_module(object) {
        Ok(SymbolClass::Module)
    } else if is_class(object) {
        Ok(SymbolClass::Class)
    } else if is_routine(object) {
        Ok(SymbolClass::Routine)
    } else {
        Err(ScribeError::Classification {
            name: object.name().unwrap_or("<anonymous>").to_string(),
            type_name: object.type_name().to_string(),
        })
    }
}
