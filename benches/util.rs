// Cycle counter used by benchmarks. On architectures without a readable
// counter, elapsed nanoseconds are returned instead.

#[cfg(target_arch = "x86_64")]
pub fn core_cycles() -> u64 {
    use core::arch::x86_64::{_mm_lfence, _rdtsc};
    unsafe {
        _mm_lfence();
        _rdtsc()
    }
}

#[cfg(target_arch = "aarch64")]
pub fn core_cycles() -> u64 {
    use core::arch::asm;
    let mut x: u64;
    unsafe {
        asm!("dsb sy", "mrs {}, pmccntr_el0", out(reg) x);
    }
    x
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
pub fn core_cycles() -> u64 {
    use std::sync::OnceLock;
    use std::time::Instant;
    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_nanos() as u64
}

// Runs `f` ten times and returns the median cost of one call, divided
// by `ops` (the number of operations that `f` performs).
#[allow(dead_code)]
pub fn median<F: FnMut()>(ops: usize, mut f: F) -> f64 {
    let mut tt = [0u64; 10];
    for t in tt.iter_mut() {
        let begin = core_cycles();
        f();
        *t = core_cycles().wrapping_sub(begin);
    }
    tt.sort_unstable();
    (tt[4] as f64) / (ops as f64)
}
