// Walks one handle through every state it can be in: declared with no target,
// set to null, bound to a number, then watching the number change underneath
// it. The same steps are repeated for a piece of text.
//
// The targets live in a Cell / RefCell so they can be changed directly while
// a handle to them is still alive. That is what shows the handle aliases the
// storage rather than holding a copy.

use crate::error::DemoError;
use crate::handle::Handle;
use crate::narrate::Narrator;
use std::cell::{Cell, RefCell};
use std::io::Write;

/// What the walkthrough observed.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicReport {
    pub started_unbound: bool,
    pub null_after_reset: bool,
    pub handle_size: usize,
    pub text_handle_size: usize,
    pub bound_value: i32,
    pub value_after_mutation: i32,
    pub text_before: String,
    pub text_after: String,
    /// The text handle still pointed at the same storage after reassignment.
    pub text_address_stable: bool,
}

pub fn run<W: Write>(narrator: &mut Narrator<W>) -> Result<BasicReport, DemoError> {
    narrator.heading("Basic pointer demo")?;
    narrator.blank()?;

    // Step 1: declared, nothing assigned yet
    let mut int_pointer: Handle<'_, Cell<i32>> = Handle::new();
    let started_unbound = !int_pointer.is_bound() && !int_pointer.is_null();
    narrator.handle("The value of uninitialized int_pointer is", &int_pointer)?;
    // The handle's own storage, not what it points at. It stays put below.
    narrator.address(
        "The memory address of uninitialized int_pointer is",
        &int_pointer as *const Handle<'_, Cell<i32>>,
    )?;
    narrator.blank()?;

    // Step 2: the explicit no-target sentinel
    int_pointer.set_null();
    let null_after_reset = int_pointer.is_null();
    narrator.handle("The value of initialized int_pointer is", &int_pointer)?;
    narrator.address(
        "The memory address of initialized int_pointer is",
        &int_pointer as *const Handle<'_, Cell<i32>>,
    )?;

    // Step 3: the handle's own size, independent of what it points at
    let handle_size = Handle::<Cell<i32>>::storage_size();
    let text_handle_size = Handle::<RefCell<String>>::storage_size();
    narrator.value("The size of initialized int_pointer is", handle_size)?;
    narrator.value("The size of a handle to a string is", text_handle_size)?;
    narrator.value(
        "Of which the address itself takes",
        Handle::<Cell<i32>>::address_width(),
    )?;
    narrator.blank()?;

    // Step 4: bind to a number and follow it
    let number = Cell::new(634634);
    narrator.value("Value of number is", number.get())?;
    narrator.address(
        "The memory address of number is",
        &number as *const Cell<i32>,
    )?;
    int_pointer.bind(&number);
    narrator.handle(
        "Value of int_pointer after pointing to number is",
        &int_pointer,
    )?;
    let bound_value = int_pointer.read()?.get();
    narrator.value("When we dereference int_pointer we get", bound_value)?;

    // Step 5: change the number directly, not through the handle
    number.set(1_000_000);
    let value_after_mutation = int_pointer.read()?.get();
    narrator.value(
        "When we change number and dereference int_pointer we get",
        value_after_mutation,
    )?;
    narrator.blank()?;

    // Same lifecycle, different target type
    let string = RefCell::new(String::from("This is a string"));
    let mut string_pointer: Handle<'_, RefCell<String>> = Handle::null();
    narrator.value("The value of string is", string.borrow())?;
    narrator.address(
        "The memory address of string is",
        &string as *const RefCell<String>,
    )?;
    narrator.handle(
        "The value of initialized string_pointer is",
        &string_pointer,
    )?;
    narrator.address(
        "The memory address of null string_pointer is",
        &string_pointer as *const Handle<'_, RefCell<String>>,
    )?;

    string_pointer.bind(&string);
    let address_before = string_pointer.address();
    narrator.handle(
        "The memory address of string pointer after pointing to string is",
        &string_pointer,
    )?;
    let text_before = string_pointer.read()?.borrow().clone();
    narrator.value("When we dereference string_pointer we get", &text_before)?;

    *string.borrow_mut() = String::from("We've changed the value of string");
    let text_after = string_pointer.read()?.borrow().clone();
    narrator.value(
        "When we change the value of string and dereference string_pointer we get",
        &text_after,
    )?;
    narrator.handle(
        "But the memory address of string_pointer is still",
        &string_pointer,
    )?;

    Ok(BasicReport {
        started_unbound,
        null_after_reset,
        handle_size,
        text_handle_size,
        bound_value,
        value_after_mutation,
        text_before,
        text_after,
        text_address_stable: string_pointer.address() == address_before,
    })
}
