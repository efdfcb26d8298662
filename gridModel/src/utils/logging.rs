use lazy_static::lazy_static;
use parking_lot::RwLock;
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::subscriber::SetGlobalDefaultError;
use tracing::Level;
use tracing_subscriber::{prelude::*, EnvFilter};
use tracing_timing::{Builder, Histogram};

/// Pipeline stages the timing report groups by.
#[derive(Hash, Eq, PartialEq, Clone, Copy, Debug)]
pub enum OperationCategory {
    DataLoad,
    Breakdown,
    EmissionFactors,
    Composition,
    Output,
}

impl OperationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationCategory::DataLoad => "Data Load",
            OperationCategory::Breakdown => "Technology Breakdown",
            OperationCategory::EmissionFactors => "Emission Factors",
            OperationCategory::Composition => "Intensity Composition",
            OperationCategory::Output => "Results Output",
        }
    }
}

// Nanosecond bounds: up to ten minutes per operation
const HISTOGRAM_MAX_NS: u64 = 600_000_000_000;

fn new_histogram() -> Option<Histogram<u64>> {
    Histogram::<u64>::new_with_bounds(1, HISTOGRAM_MAX_NS, 3).ok()
}

thread_local! {
    static TIMING_STACK: RefCell<Vec<String>> = RefCell::new(Vec::new());
}

lazy_static! {
    static ref TIMING_ENABLED: AtomicBool = AtomicBool::new(false);
    static ref FUNCTION_TIMINGS: Arc<RwLock<HashMap<String, Histogram<u64>>>> = Arc::new(RwLock::new(HashMap::new()));
    static ref CATEGORY_TIMINGS: Arc<RwLock<HashMap<OperationCategory, Histogram<u64>>>> = Arc::new(RwLock::new(HashMap::new()));
    static ref HIERARCHICAL_TIMINGS: Arc<RwLock<HashMap<String, (Duration, usize, Vec<String>)>>> = Arc::new(RwLock::new(HashMap::new()));
}

/// Records the elapsed time of a scope when dropped.
pub struct TimingGuard {
    function_name: String,
    category: OperationCategory,
    start: Instant,
    tracked: bool,
}

impl Drop for TimingGuard {
    fn drop(&mut self) {
        if self.tracked {
            record_timing_end(&self.function_name, self.start.elapsed(), self.category);
        }
    }
}

pub fn start_timing(function_name: &str, category: OperationCategory) -> TimingGuard {
    let tracked = is_timing_enabled();
    if tracked {
        TIMING_STACK.with(|stack| stack.borrow_mut().push(function_name.to_string()));
    }
    TimingGuard {
        function_name: function_name.to_string(),
        category,
        start: Instant::now(),
        tracked,
    }
}

fn record_timing_end(function_name: &str, duration: Duration, category: OperationCategory) {
    let duration_ns = duration.as_nanos().min(HISTOGRAM_MAX_NS as u128) as u64;

    TIMING_STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        stack.pop();
        let mut hierarchical = HIERARCHICAL_TIMINGS.write();
        let entry = hierarchical
            .entry(function_name.to_string())
            .or_insert((Duration::ZERO, 0, Vec::new()));
        entry.0 += duration;
        entry.1 += 1;
        if let Some(parent) = stack.last() {
            if !entry.2.contains(parent) {
                entry.2.push(parent.clone());
            }
        }
    });

    {
        let mut timings = FUNCTION_TIMINGS.write();
        if !timings.contains_key(function_name) {
            if let Some(histogram) = new_histogram() {
                timings.insert(function_name.to_string(), histogram);
            }
        }
        if let Some(histogram) = timings.get_mut(function_name) {
            let _ = histogram.record(duration_ns);
        }
    }

    {
        let mut category_timings = CATEGORY_TIMINGS.write();
        if !category_timings.contains_key(&category) {
            if let Some(histogram) = new_histogram() {
                category_timings.insert(category, histogram);
            }
        }
        if let Some(histogram) = category_timings.get_mut(&category) {
            let _ = histogram.record(duration_ns);
        }
    }
}

/// Install the global subscriber. `RUST_LOG` directives still apply; the
/// crate's own events are shown at debug level when `debug` is set.
pub fn init_logging(enable_timing: bool, debug: bool) -> Result<(), SetGlobalDefaultError> {
    TIMING_ENABLED.store(enable_timing, Ordering::SeqCst);

    let mut env_filter = EnvFilter::from_default_env().add_directive(Level::INFO.into());
    if debug {
        if let Ok(directive) = "cangrid=debug".parse() {
            env_filter = env_filter.add_directive(directive);
        }
    }

    if enable_timing {
        // constant bounds, construction cannot fail
        let timing_layer = Builder::default().layer(|| {
            Histogram::<u64>::new_with_bounds(1, HISTOGRAM_MAX_NS, 3).expect("valid histogram bounds")
        });

        let subscriber = tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .with(timing_layer.boxed());

        tracing::subscriber::set_global_default(subscriber)
    } else {
        let subscriber = tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty());

        tracing::subscriber::set_global_default(subscriber)
    }
}

pub fn is_timing_enabled() -> bool {
    TIMING_ENABLED.load(Ordering::SeqCst)
}

/// 95th percentile of a function's recorded scopes, in milliseconds.
fn function_p95_ms(function_name: &str) -> Option<f64> {
    FUNCTION_TIMINGS
        .read()
        .get(function_name)
        .filter(|histogram| !histogram.is_empty())
        .map(|histogram| histogram.value_at_quantile(0.95) as f64 / 1_000_000.0)
}

pub fn print_timing_report() {
    if !is_timing_enabled() {
        return;
    }

    println!("\nPerformance Report");
    println!("==================");

    println!("\nBy function:");
    println!("------------");
    let hierarchical = HIERARCHICAL_TIMINGS.read();
    let mut entries: Vec<_> = hierarchical.iter().collect();
    entries.sort_by(|a, b| b.1 .0.cmp(&a.1 .0));

    for (function_name, (total_duration, count, parents)) in entries {
        let avg_duration = total_duration.div_f64(*count as f64);
        println!(
            "{}: total={:.3}s, count={}, avg={:.2}ms, p95={:.2}ms{}",
            function_name,
            total_duration.as_secs_f64(),
            count,
            avg_duration.as_secs_f64() * 1000.0,
            function_p95_ms(function_name).unwrap_or(0.0),
            if parents.is_empty() {
                String::new()
            } else {
                format!("\n  Called by: {}", parents.join(", "))
            }
        );
    }

    println!("\nBy stage:");
    println!("---------");
    let category_timings = CATEGORY_TIMINGS.read();
    let mut category_vec: Vec<_> = category_timings.iter().collect();
    category_vec.sort_by(|a, b| {
        let a_total = a.1.mean() * a.1.len() as f64;
        let b_total = b.1.mean() * b.1.len() as f64;
        b_total.partial_cmp(&a_total).unwrap_or(std::cmp::Ordering::Equal)
    });

    let total_time: f64 = category_vec
        .iter()
        .map(|(_, hist)| hist.mean() * hist.len() as f64)
        .sum();

    for (category, histogram) in category_vec {
        let category_total = histogram.mean() * histogram.len() as f64;
        let percentage = if total_time > 0.0 { category_total / total_time * 100.0 } else { 0.0 };
        println!(
            "{}: {:.1}% of total time\n  mean={:.2}ms, p95={:.2}ms, count={}, total={:.3}s",
            category.as_str(),
            percentage,
            histogram.mean() / 1_000_000.0,
            histogram.value_at_quantile(0.95) as f64 / 1_000_000.0,
            histogram.len(),
            category_total / 1_000_000_000.0,
        );
    }

    println!("==================\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_is_inert_when_timing_disabled() {
        // the flag is only ever set by init_logging, which no unit test calls
        let guard = start_timing("inert", OperationCategory::DataLoad);
        assert!(!guard.tracked);
        drop(guard);
        assert!(!FUNCTION_TIMINGS.read().contains_key("inert"));
        TIMING_STACK.with(|stack| assert!(stack.borrow().is_empty()));
    }

    #[test]
    fn test_function_p95_from_recorded_scopes() {
        for _ in 0..5 {
            record_timing_end("slice_workbook_p95", Duration::from_millis(2), OperationCategory::DataLoad);
        }
        let p95 = function_p95_ms("slice_workbook_p95").unwrap();
        assert!((p95 - 2.0).abs() <= 0.01, "p95 = {}", p95);
        assert_eq!(function_p95_ms("never_recorded"), None);
    }

    #[test]
    fn test_category_names() {
        assert_eq!(OperationCategory::Breakdown.as_str(), "Technology Breakdown");
        assert_eq!(OperationCategory::Composition.as_str(), "Intensity Composition");
    }
}
