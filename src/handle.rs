// Reference handle: a typed, nullable indirection to someone else's storage.
//
// A handle starts out `Unbound` rather than holding some arbitrary address.
// The state is part of the type, so there is no way to follow a handle
// without first finding out whether it has a target.

use crate::error::HandleError;
use std::mem;
use std::ptr;

#[derive(Debug)]
pub enum Handle<'a, T> {
    /// Declared, never assigned.
    Unbound,
    /// The explicit "no target" sentinel.
    Null,
    Bound(&'a T),
}

impl<T> Clone for Handle<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<'_, T> {}

impl<T> Default for Handle<'_, T> {
    fn default() -> Self {
        Handle::Unbound
    }
}

/// `None` becomes the null sentinel; an `Option` never needs `Unbound`.
impl<'a, T> From<Option<&'a T>> for Handle<'a, T> {
    fn from(target: Option<&'a T>) -> Self {
        match target {
            Some(target) => Handle::Bound(target),
            None => Handle::Null,
        }
    }
}

impl<'a, T> Handle<'a, T> {
    pub const fn new() -> Self {
        Handle::Unbound
    }

    pub const fn null() -> Self {
        Handle::Null
    }

    /// Point the handle at `target`. Whatever it pointed at before is
    /// forgotten; the old target itself is untouched.
    pub fn bind(&mut self, target: &'a T) {
        *self = Handle::Bound(target);
    }

    pub fn set_null(&mut self) {
        *self = Handle::Null;
    }

    pub fn is_bound(&self) -> bool {
        matches!(self, Handle::Bound(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Handle::Null)
    }

    pub fn target(&self) -> Option<&'a T> {
        match *self {
            Handle::Bound(target) => Some(target),
            Handle::Unbound | Handle::Null => None,
        }
    }

    /// Checked indirection.
    pub fn read(&self) -> Result<&'a T, HandleError> {
        match *self {
            Handle::Bound(target) => Ok(target),
            Handle::Unbound => Err(HandleError::Unbound),
            Handle::Null => Err(HandleError::Null),
        }
    }

    /// The handle's value: the address of its target, if it has one.
    pub fn address(&self) -> Option<*const T> {
        self.target().map(|target| target as *const T)
    }

    pub fn points_to(&self, other: &T) -> bool {
        self.target().is_some_and(|target| ptr::eq(target, other))
    }

    /// Bytes the handle itself occupies. Depends only on the handle's shape,
    /// never on what `T` is.
    pub fn storage_size() -> usize {
        mem::size_of::<Self>()
    }

    /// Bytes of the raw address inside a bound handle.
    pub fn address_width() -> usize {
        mem::size_of::<&T>()
    }
}
