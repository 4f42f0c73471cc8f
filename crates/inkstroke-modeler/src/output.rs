use inkstroke_core::StrokeResult;

/// Outcome of a call that writes results into a caller buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct OutputCount {
    /// Results copied into the buffer.
    pub written: usize,
    /// Results the call produced; larger than `written` when the buffer was too small.
    pub total: usize,
    /// Results the sampling bounds asked for before `max_outputs_per_call` applied.
    pub requested: usize,
}

impl OutputCount {
    /// The caller's buffer could not hold every result.
    pub fn is_truncated(&self) -> bool {
        self.written < self.total
    }

    /// Resampling was coarsened to stay within `max_outputs_per_call`.
    pub fn is_capped(&self) -> bool {
        self.total < self.requested
    }
}

/// Copies as many `results` as fit into `out`.
pub(crate) fn write_results(
    results: &[StrokeResult],
    out: &mut [StrokeResult],
    requested: usize,
) -> OutputCount {
    let written = results.len().min(out.len());
    out[..written].copy_from_slice(&results[..written]);
    OutputCount {
        written,
        total: results.len(),
        requested: requested.max(results.len()),
    }
}
