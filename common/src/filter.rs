/// A filter that keeps some parts of input, for example, some elements of an
/// array, and transfers them to the output.
pub trait Filter<T: ?Sized> {
    /// Only the indices of the kept elements are returned, so callers that
    /// need the removed part as well should use `filter_all_indices`.
    fn filter_indices(&mut self, input: &T) -> Vec<usize>;

    /// Returns the kept indices and the removed ones, both ascending.
    fn filter_all_indices(&mut self, input: &T) -> (Vec<usize>, Vec<usize>);
}

/// A filter that produces a new point cloud, either a subset of the input or
/// an approximation of it.
pub trait ApproxFilter<T> {
    fn filter(&mut self, input: &T) -> T;
}
