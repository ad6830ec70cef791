use std::cell::Cell;
use std::rc::Rc;

thread_local! {
    static FALLBACK: StackOrder = StackOrder::default();
}

/// Board-wide z-index counter. Cloned handles share one counter; the most
/// recently grabbed paper always holds the highest value.
#[derive(Clone, Debug)]
pub struct StackOrder {
    next: Rc<Cell<i32>>,
}

impl StackOrder {
    pub fn new(start: i32) -> Self {
        Self {
            next: Rc::new(Cell::new(start)),
        }
    }

    /// Page-wide counter for papers rendered without a provider, so they still
    /// share one stacking sequence.
    pub fn shared() -> Self {
        FALLBACK.with(|order| order.clone())
    }

    /// Hands out the current value and advances the counter.
    pub fn claim(&self) -> i32 {
        let z = self.next.get();
        self.next.set(z + 1);
        z
    }

    #[cfg(test)]
    pub fn peek(&self) -> i32 {
        self.next.get()
    }
}

impl Default for StackOrder {
    fn default() -> Self {
        Self::new(1)
    }
}

// Context value equality: same underlying counter.
impl PartialEq for StackOrder {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.next, &other.next)
    }
}
