/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Token for the next page; `None` once the listing is exhausted.
    pub continuation: Option<String>,
}

impl<T> Page<T> {
    /// A page with more to come when `continuation` is a non-empty token.
    pub fn new(items: Vec<T>, continuation: Option<String>) -> Self {
        Self {
            items,
            continuation: continuation.filter(|c| !c.is_empty()),
        }
    }

    /// The final page of a listing.
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            continuation: None,
        }
    }

    pub fn is_last(&self) -> bool {
        self.continuation.is_none()
    }
}
