/// Generate approximately count ticks within the given range
pub fn ticks(start: f32, stop: f32, count: f32) -> Vec<f32> {
    if count <= 0.0 || count.is_nan() || start.is_nan() || stop.is_nan() {
        return vec![];
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (i1, i2, inc) = if reverse {
        tick_spec(stop, start, count)
    } else {
        tick_spec(start, stop, count)
    };
    if !(i2 >= i1) || !inc.is_finite() {
        return vec![];
    }

    let n = (i2 - i1 + 1.0) as usize;
    (0..n)
        .map(|i| {
            let index = if reverse { i2 - i as f32 } else { i1 + i as f32 };
            if inc < 0.0 {
                index / -inc
            } else {
                index * inc
            }
        })
        .collect()
}

/// Start index, stop index and increment. A negative increment is a reciprocal.
fn tick_spec(start: f32, stop: f32, count: f32) -> (f32, f32, f32) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let factor = step_factor(step / 10.0_f32.powf(power));

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let temp_inc = 10.0_f32.powf(-power) / factor;
        i1 = (start * temp_inc).round();
        i2 = (stop * temp_inc).round();
        if i1 / temp_inc < start {
            i1 += 1.0;
        }
        if i2 / temp_inc > stop {
            i2 -= 1.0;
        }
        inc = -temp_inc;
    } else {
        inc = 10.0_f32.powf(power) * factor;
        i1 = (start / inc).round();
        i2 = (stop / inc).round();
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
    }

    if i2 < i1 && 0.5 <= count && count < 2.0 {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

fn step_factor(error: f32) -> f32 {
    if error >= 50.0_f32.sqrt() {
        10.0
    } else if error >= 10.0_f32.sqrt() {
        5.0
    } else if error >= 2.0_f32.sqrt() {
        2.0
    } else {
        1.0
    }
}

/// Distance between consecutive ticks for the given range and count
pub fn tick_step(start: f32, stop: f32, count: f32) -> f32 {
    if !(count > 0.0) || start == stop {
        return 0.0;
    }
    let step = ((stop - start) / count).abs();
    let power = step.log10().floor();
    10.0_f32.powf(power) * step_factor(step / 10.0_f32.powf(power))
}

/// Tick increment for the range. Steps below one are returned as a negative
/// reciprocal so callers can divide instead of multiplying by a fraction.
pub fn tick_increment(start: f32, stop: f32, count: f32) -> f32 {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let factor = step_factor(step / 10.0_f32.powf(power));
    if power >= 0.0 {
        factor * 10.0_f32.powf(power)
    } else {
        -10.0_f32.powf(-power) / factor
    }
}

/// Extend a domain outward to multiples of the tick step
pub fn nice(domain: (f32, f32), count: f32) -> (f32, f32) {
    let (d0, d1) = domain;
    if d0 == d1 || d0.is_nan() || d1.is_nan() {
        return domain;
    }

    let (mut start, mut stop) = if d0 <= d1 { (d0, d1) } else { (d1, d0) };
    let mut prestep = 0.0;
    for _ in 0..10 {
        let step = tick_increment(start, stop, count);
        if step == prestep || !step.is_finite() {
            break;
        } else if step > 0.0 {
            start = (start / step).floor() * step;
            stop = (stop / step).ceil() * step;
        } else if step < 0.0 {
            start = (start * step).ceil() / step;
            stop = (stop * step).floor() / step;
        } else {
            break;
        }
        prestep = step;
    }

    if d0 <= d1 {
        (start, stop)
    } else {
        (stop, start)
    }
}

/// Format a tick value with just enough decimals for the tick step
pub fn format_tick(value: f32, step: f32) -> String {
    let decimals = if step > 0.0 && step.is_finite() {
        (-step.log10().floor()).max(0.0) as usize
    } else {
        0
    };
    let formatted = format!("{value:.decimals$}");
    // Avoid "-0"
    if formatted.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        formatted.trim_start_matches('-').to_string()
    } else {
        formatted
    }
}
