// Passing references into functions: mutate through one, read through two,
// swap through two, and hand a fresh heap allocation back to the caller.

use crate::error::{DemoError, HandleError};
use crate::handle::Handle;
use crate::narrate::Narrator;
use std::io::Write;
use std::ptr::NonNull;

// ============================================================================
// The four operations
// ============================================================================

pub fn double_in_place(value: &mut i32) {
    *value *= 2;
}

/// Reads both targets and returns the product by value. Neither target changes.
pub fn multiply(first: &i32, second: &i32) -> i32 {
    *first * *second
}

/// Exchanges what the two references point at. The references keep their
/// targets; only the contents move.
pub fn swap_values<T: Copy>(first: &mut T, second: &mut T) {
    // Without the placeholder the first value is gone once it is overwritten
    let placeholder = *first;
    *first = *second;
    *second = placeholder;
}

/// Stores the sum in a new heap allocation and gives the caller sole
/// ownership of it. The allocation is freed when the returned box is dropped.
pub fn add_to_heap(first: &i32, second: &i32) -> Box<i32> {
    Box::new(*first + *second)
}

/// Like [`add_to_heap`], but the caller gets a bare pointer and with it the
/// duty to free the storage through [`release_raw`].
pub fn add_to_raw(first: &i32, second: &i32) -> NonNull<i32> {
    NonNull::from(Box::leak(add_to_heap(first, second)))
}

/// Reads and frees an allocation made by [`add_to_raw`].
///
/// # Safety
///
/// `ptr` must come from [`add_to_raw`] and must not have been released
/// already. It is dangling once this returns.
pub unsafe fn release_raw(ptr: NonNull<i32>) -> i32 {
    let owned = Box::from_raw(ptr.as_ptr());
    *owned
}

// ============================================================================
// Narrated walkthrough
// ============================================================================

/// What the walkthrough observed, for callers that want more than the text.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionsReport {
    pub doubled: i32,
    pub product: i32,
    pub multiplied_inputs: (i32, i32),
    pub swapped: (f64, f64),
    pub heap_sum: i32,
    pub raw_sum: i32,
}

pub fn run<W: Write>(narrator: &mut Narrator<W>) -> Result<FunctionsReport, DemoError> {
    narrator.heading("Pointer function demo")?;
    narrator.blank()?;

    let doubled = demo_double(narrator)?;
    narrator.blank()?;
    let (product, multiplied_inputs) = demo_multiply(narrator)?;
    narrator.blank()?;
    let swapped = demo_swap(narrator)?;
    narrator.blank()?;
    let (heap_sum, raw_sum) = demo_add(narrator)?;

    Ok(FunctionsReport {
        doubled,
        product,
        multiplied_inputs,
        swapped,
        heap_sum,
        raw_sum,
    })
}

fn demo_double<W: Write>(narrator: &mut Narrator<W>) -> Result<i32, DemoError> {
    let mut number_to_double = 25;
    let mut int_pointer: Option<&mut i32> = None;
    narrator.value("The value of number is", number_to_double)?;
    narrator.handle(
        "int_pointer is currently pointing to",
        &Handle::from(int_pointer.as_deref()),
    )?;
    narrator.address("The address of number is", &number_to_double as *const i32)?;

    int_pointer = Some(&mut number_to_double);
    narrator.handle(
        "int_pointer is now pointing to address",
        &Handle::from(int_pointer.as_deref()),
    )?;
    let target = int_pointer.ok_or(HandleError::Null)?;
    double_in_place(target);
    narrator.value(
        "The value at address int_pointer after passing it to double_in_place is",
        *target,
    )?;

    Ok(number_to_double)
}

fn demo_multiply<W: Write>(narrator: &mut Narrator<W>) -> Result<(i32, (i32, i32)), DemoError> {
    let first_number = 10;
    narrator.value_at("The value of number 1 is", &first_number)?;
    let second_number = 20;
    narrator.value_at("The value of number 2 is", &second_number)?;

    let pointer_to_first = &first_number;
    let pointer_to_second = &second_number;
    narrator.address(
        "pointer_to_first is pointing at memory address",
        pointer_to_first as *const i32,
    )?;
    narrator.address(
        "pointer_to_second is pointing at memory address",
        pointer_to_second as *const i32,
    )?;

    let result = multiply(pointer_to_first, pointer_to_second);
    narrator.value("Passing these 2 pointers to multiply results", result)?;

    Ok((result, (first_number, second_number)))
}

fn describe_pair(first: f64, second: f64) -> String {
    format!("{first} and dereferencing second pointer gives: {second}")
}

fn demo_swap<W: Write>(narrator: &mut Narrator<W>) -> Result<(f64, f64), DemoError> {
    let mut first_number = 5.5_f64;
    narrator.value_at("The value of number 1 is", &first_number)?;
    let mut second_number = 100.1_f64;
    narrator.value_at("The value of number 2 is", &second_number)?;

    let first_pointer = &mut first_number;
    let second_pointer = &mut second_number;
    let first_at = first_pointer as *const f64;
    let second_at = second_pointer as *const f64;
    narrator.address("First pointer is pointing to memory address", first_at)?;
    narrator.address("Second pointer is pointing to memory address", second_at)?;

    narrator.value(
        "PRE SWAP: dereferencing first pointer gives",
        describe_pair(*first_pointer, *second_pointer),
    )?;
    swap_values(first_pointer, second_pointer);
    narrator.value(
        "POST SWAP: dereferencing first pointer gives",
        describe_pair(*first_pointer, *second_pointer),
    )?;
    // Same targets, new contents
    narrator.address(
        "First pointer still points to address",
        first_pointer as *const f64,
    )?;

    Ok((first_number, second_number))
}

fn demo_add<W: Write>(narrator: &mut Narrator<W>) -> Result<(i32, i32), DemoError> {
    let first_number = 100;
    narrator.value_at("The value of number 1 is", &first_number)?;
    let second_number = 200;
    narrator.value_at("The value of number 2 is", &second_number)?;
    narrator.address(
        "First pointer is pointing to memory address",
        &first_number as *const i32,
    )?;
    narrator.address(
        "Second pointer is pointing to memory address",
        &second_number as *const i32,
    )?;

    let result = add_to_heap(&first_number, &second_number);
    narrator.address(
        "The result box owns heap memory at address",
        &*result as *const i32,
    )?;
    narrator.value("Dereferencing the result box gives", *result)?;
    let heap_sum = *result;
    drop(result);
    narrator.value("The result box has been dropped", "heap memory released")?;

    let raw = add_to_raw(&first_number, &second_number);
    narrator.address(
        "The raw result pointer is at memory address",
        raw.as_ptr() as *const i32,
    )?;
    // SAFETY: `raw` came from add_to_raw just above and is released once, here.
    let raw_sum = unsafe { release_raw(raw) };
    narrator.value("Releasing the raw pointer by hand gives back", raw_sum)?;

    Ok((heap_sum, raw_sum))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DemoConfig;
    use proptest::prelude::*;
    use std::ops::RangeInclusive;

    // Doubling or adding two of these never overflows
    const HALF_RANGE: RangeInclusive<i32> = (i32::MIN / 2)..=(i32::MAX / 2);

    fn quiet() -> Narrator<Vec<u8>> {
        Narrator::new(
            Vec::new(),
            DemoConfig {
                color: false,
                show_addresses: false,
            },
        )
    }

    #[test]
    fn test_double_in_place() {
        let mut number = 25;
        double_in_place(&mut number);
        assert_eq!(number, 50);
    }

    #[test]
    fn test_multiply_leaves_inputs() {
        let first = 10;
        let second = 20;
        assert_eq!(multiply(&first, &second), 200);
        assert_eq!((first, second), (10, 20));
    }

    #[test]
    fn test_multiply_same_target_twice() {
        let value = 9;
        assert_eq!(multiply(&value, &value), 81);
    }

    #[test]
    fn test_swap_doubles() {
        let mut first = 5.5;
        let mut second = 100.1;
        swap_values(&mut first, &mut second);
        assert_eq!(first, 100.1);
        assert_eq!(second, 5.5);
    }

    #[test]
    fn test_swap_keeps_targets() {
        let mut pair = [1, 2];
        let (left, right) = pair.split_at_mut(1);
        let left_at = &left[0] as *const i32;
        swap_values(&mut left[0], &mut right[0]);
        assert_eq!(&left[0] as *const i32, left_at);
        assert_eq!(pair, [2, 1]);
    }

    #[test]
    fn test_add_to_heap() {
        let sum = add_to_heap(&100, &200);
        assert_eq!(*sum, 300);
    }

    #[test]
    fn test_add_to_heap_returns_fresh_storage() {
        let first = 1;
        let second = 2;
        let sum = add_to_heap(&first, &second);
        assert!(!std::ptr::eq(&*sum, &first));
        assert!(!std::ptr::eq(&*sum, &second));
    }

    #[test]
    fn test_raw_round_trip() {
        let raw = add_to_raw(&100, &200);
        let value = unsafe { release_raw(raw) };
        assert_eq!(value, 300);
    }

    #[test]
    fn test_run_reports_results() {
        let mut narrator = quiet();
        let report = run(&mut narrator).unwrap();
        assert_eq!(
            report,
            FunctionsReport {
                doubled: 50,
                product: 200,
                multiplied_inputs: (10, 20),
                swapped: (100.1, 5.5),
                heap_sum: 300,
                raw_sum: 300,
            }
        );
    }

    #[test]
    fn test_run_narration() {
        let mut narrator = quiet();
        run(&mut narrator).unwrap();
        let output = String::from_utf8(narrator.into_inner()).unwrap();

        for line in [
            "int_pointer is currently pointing to: null\n",
            "int_pointer is now pointing to address: <address>\n",
            "after passing it to double_in_place is: 50\n",
            "Passing these 2 pointers to multiply results: 200\n",
            "PRE SWAP: dereferencing first pointer gives: 5.5 and dereferencing second \
             pointer gives: 100.1\n",
            "POST SWAP: dereferencing first pointer gives: 100.1 and dereferencing second \
             pointer gives: 5.5\n",
            "Dereferencing the result box gives: 300\n",
            "Releasing the raw pointer by hand gives back: 300\n",
        ] {
            assert!(output.contains(line), "missing {line:?}");
        }
        assert!(!output.contains("0x"));
    }

    #[test]
    fn test_int_pointer_is_rebound_not_replaced() {
        let mut narrator = Narrator::new(
            Vec::new(),
            DemoConfig {
                color: false,
                show_addresses: true,
            },
        );
        run(&mut narrator).unwrap();
        let output = String::from_utf8(narrator.into_inner()).unwrap();
        let after = |label: &str| {
            output
                .lines()
                .find_map(|line| line.strip_prefix(label))
                .map(str::to_string)
        };

        let number_at = after("The address of number is: ");
        let pointer_at = after("int_pointer is now pointing to address: ");
        assert!(number_at.as_deref().is_some_and(|at| at.starts_with("0x")));
        assert_eq!(number_at, pointer_at);
    }

    proptest! {
        #[test]
        fn prop_double(n in HALF_RANGE) {
            let mut value = n;
            double_in_place(&mut value);
            prop_assert_eq!(value, 2 * n);
        }

        #[test]
        fn prop_multiply(a in -46_340i32..=46_340, b in -46_340i32..=46_340) {
            let (first, second) = (a, b);
            prop_assert_eq!(multiply(&first, &second), a * b);
            prop_assert_eq!((first, second), (a, b));
        }

        #[test]
        fn prop_swap(x in any::<f64>(), y in any::<f64>()) {
            let (mut first, mut second) = (x, y);
            swap_values(&mut first, &mut second);
            prop_assert_eq!(first.to_bits(), y.to_bits());
            prop_assert_eq!(second.to_bits(), x.to_bits());
        }

        #[test]
        fn prop_add_to_heap(p in HALF_RANGE, q in HALF_RANGE) {
            prop_assert_eq!(*add_to_heap(&p, &q), p + q);
            let raw = add_to_raw(&p, &q);
            prop_assert_eq!(unsafe { release_raw(raw) }, p + q);
        }
    }
}
