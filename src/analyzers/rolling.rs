//! Moving-average smoothing for daily series.

/// Moving average of `values` over `window` consecutive entries.
///
/// Computed in O(n) from prefix sums. Without `fillna` the result has
/// `n - window + 1` entries, each averaging the window that ends at that
/// position. With `fillna` the front is padded with `window - 1` `None`s so the
/// output lines up with the input. A zero window, or one longer than the input,
/// has no complete windows.
pub fn rolling_average(values: &[f64], window: usize, fillna: bool) -> Vec<Option<f64>> {
    let n = values.len();
    let complete = if window == 0 || window > n {
        0
    } else {
        n - window + 1
    };

    let mut result = Vec::with_capacity(if fillna { n } else { complete });
    if fillna {
        let padding = if complete == 0 { n } else { window - 1 };
        result.resize(padding, None);
    }
    if complete == 0 {
        return result;
    }

    let mut prefix = Vec::with_capacity(n + 1);
    prefix.push(0.0);
    let mut running = 0.0;
    for value in values {
        running += value;
        prefix.push(running);
    }

    let size = window as f64;
    result.extend((window..=n).map(|end| Some((prefix[end] - prefix[end - window]) / size)));
    result
}

/// Shift a trailing-window average so each value sits on its window's middle day.
///
/// Rotates left by `(window - 1) / 2`, moving that many leading entries to the end.
/// Exact for odd windows; even windows stay half a day late.
pub fn recenter<T>(mut series: Vec<T>, window: usize) -> Vec<T> {
    if series.is_empty() {
        return series;
    }
    let shift = (window.saturating_sub(1) / 2).min(series.len());
    series.rotate_left(shift);
    series
}

/// Rolling average with fill, recentered on the window's middle day.
pub fn centered_average(values: &[f64], window: usize) -> Vec<Option<f64>> {
    recenter(rolling_average(values, window, true), window)
}
