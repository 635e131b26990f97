// ==========================================
// 纸机日成本核算系统 - 性能统计
// ==========================================
// 职责: 记录一次核算运行的耗时与产出事实数
// 输出: tracing target = "perf"
// ==========================================

use std::cell::Cell;
use std::time::Instant;

thread_local! {
    static PERF_DEPTH: Cell<u32> = Cell::new(0);
    static FACT_COUNT: Cell<u64> = Cell::new(0);
}

/// 累加已解析的事实条数（仅在 PerfGuard 作用域内计数）
pub fn record_facts(count: usize) {
    let active = PERF_DEPTH.with(|d| d.get() > 0);
    if !active {
        return;
    }
    FACT_COUNT.with(|c| c.set(c.get().saturating_add(count as u64)));
}

/// 性能统计 Guard：记录 elapsed_ms + 事实条数
///
/// 使用方式：
/// ```ignore
/// let _perf = tissue_costing::perf::PerfGuard::new("costing_run");
/// // do work...
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    facts_start: u64,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        PERF_DEPTH.with(|d| d.set(d.get().saturating_add(1)));
        let facts_start = FACT_COUNT.with(|c| c.get());
        Self {
            op,
            start: Instant::now(),
            facts_start,
        }
    }

    /// 当前作用域内已累计的事实条数
    pub fn facts(&self) -> u64 {
        FACT_COUNT.with(|c| c.get()).saturating_sub(self.facts_start)
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_millis() as u64;
        let fact_count = self.facts();

        tracing::info!(
            target: "perf",
            op = self.op,
            elapsed_ms,
            fact_count,
            "done"
        );

        PERF_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facts_counted_only_inside_guard() {
        record_facts(5); // 作用域外,不计数
        let guard = PerfGuard::new("test");
        record_facts(3);
        record_facts(4);
        assert_eq!(guard.facts(), 7);
    }

    #[test]
    fn test_nested_guards_share_counter() {
        let outer = PerfGuard::new("outer");
        {
            let inner = PerfGuard::new("inner");
            record_facts(2);
            assert_eq!(inner.facts(), 2);
        }
        record_facts(1);
        assert_eq!(outer.facts(), 3);
    }
}
