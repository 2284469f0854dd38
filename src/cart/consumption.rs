//! Consumption
//!
//! Removing matched quantities from a cart. Every function here returns a new
//! cart and leaves its argument untouched, so the same cart can be handed to
//! many search branches.
//!
//! Each call is a linear scan over the cart lines, `O(lines)`.

use std::num::NonZeroU32;

use smallvec::SmallVec;

use crate::cart::{Cart, CartItem};

/// Remove `target`'s quantity from every line holding the same catalog item.
///
/// Lines left with a positive remainder keep that remainder, lines reduced to
/// zero are dropped, and lines for other items pass through in their original
/// relative order.
#[must_use]
pub fn remove<'a>(target: &CartItem<'a>, cart: &Cart<'a>) -> Cart<'a> {
    let lines: SmallVec<[CartItem<'a>; 10]> = cart
        .iter()
        .filter_map(|line| {
            if line.item() != target.item() {
                return Some(*line);
            }

            let remainder = line
                .quantity()
                .get()
                .saturating_sub(target.quantity().get());

            NonZeroU32::new(remainder)
                .map(|quantity| CartItem::with_quantity(*line.item(), quantity))
        })
        .collect();

    Cart::from_lines(lines, cart.currency())
}

/// Remove the line at `idx` entirely.
#[must_use]
pub fn remove_line<'a>(idx: usize, cart: &Cart<'a>) -> Cart<'a> {
    let lines: SmallVec<[CartItem<'a>; 10]> = cart
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != idx)
        .map(|(_, line)| *line)
        .collect();

    Cart::from_lines(lines, cart.currency())
}

/// Replace the quantity of the line at `idx`, keeping its position.
#[must_use]
pub fn replace_quantity<'a>(idx: usize, quantity: NonZeroU32, cart: &Cart<'a>) -> Cart<'a> {
    let lines: SmallVec<[CartItem<'a>; 10]> = cart
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if i == idx {
                CartItem::with_quantity(*line.item(), quantity)
            } else {
                *line
            }
        })
        .collect();

    Cart::from_lines(lines, cart.currency())
}

/// Return whether the cart holds at least the combined quantity of every
/// required catalog item.
pub fn covers(requirements: &[CartItem<'_>], cart: &Cart<'_>) -> bool {
    requirements.iter().all(|required| {
        let needed: u64 = requirements
            .iter()
            .filter(|other| other.item() == required.item())
            .map(|other| u64::from(other.quantity().get()))
            .sum();

        let available: u64 = cart
            .iter()
            .filter(|line| line.item() == required.item())
            .map(|line| u64::from(line.quantity().get()))
            .sum();

        available >= needed
    })
}
