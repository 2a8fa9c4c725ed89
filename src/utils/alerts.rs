/// Counts runs of at least `min_consecutive` consecutive values at or above
/// `threshold`. Each qualifying run counts once no matter how long it lasts.
pub fn count_alert_runs(values: &[f64], threshold: f64, min_consecutive: usize) -> usize {
    if min_consecutive == 0 {
        return 0;
    }

    let mut count = 0;
    let mut run = 0;

    for &value in values {
        if value >= threshold {
            run += 1;
            if run == min_consecutive {
                count += 1;
            }
        } else {
            run = 0;
        }
    }

    count
}
