/// A skip/take window over an ordered result set.
///
/// Both bounds are optional: no `skip` starts at the first row, no `take`
/// returns everything after the skipped rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkipTake {
    pub skip: Option<u64>,
    pub take: Option<u64>,
}

impl SkipTake {
    pub fn new(skip: Option<u64>, take: Option<u64>) -> Self {
        Self { skip, take }
    }

    pub fn get_offset(&self) -> u64 {
        self.skip.unwrap_or(0)
    }

    pub fn get_limit(&self) -> Option<u64> {
        self.take
    }

    /// Applies the window to an already ordered iterator.
    pub fn apply<I: Iterator>(self, iter: I) -> impl Iterator<Item = I::Item> {
        let skip = usize::try_from(self.get_offset()).unwrap_or(usize::MAX);
        let take = self
            .get_limit()
            .map(|t| usize::try_from(t).unwrap_or(usize::MAX))
            .unwrap_or(usize::MAX);
        iter.skip(skip).take(take)
    }
}
