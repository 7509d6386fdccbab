/// Smallest and largest value of a sample set
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct ValueRange {
    pub low: f32,
    pub high: f32,
}

impl ValueRange {
    /// Range covering every sample, `<0;0>` when there are none.
    /// NaN samples are skipped.
    pub fn from_samples<I>(iter: impl IntoIterator<Item = I>) -> ValueRange
    where
        I: Into<f32>,
    {
        let bounds = iter
            .into_iter()
            .map(Into::into)
            .filter(|v: &f32| !v.is_nan())
            .fold(None, |acc: Option<(f32, f32)>, v| match acc {
                Some((low, high)) => Some((low.min(v), high.max(v))),
                None => Some((v, v)),
            });

        let (low, high) = bounds.unwrap_or((0.0, 0.0));
        ValueRange { low, high }
    }
}
