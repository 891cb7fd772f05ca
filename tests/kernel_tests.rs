mod support;

use stencil_sign::config::GeneratorConfig;
use stencil_sign::kernel::KernelHandle;
use stencil_sign::SignGenerator;
use support::{assert_solid, request};

#[test]
fn concurrent_requests_serialize_on_the_kernel() {
    let kernel = KernelHandle::new();
    let generator = SignGenerator::with_kernel(GeneratorConfig::default(), kernel.clone());

    let handles: Vec<_> = (0..4)
        .map(|_| generator.spawn(request("EXIT", 100.0, 25.0)))
        .collect();
    let signs: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("worker panicked").expect("generation failed"))
        .collect();

    for sign in &signs {
        assert_eq!(sign.plan.sizing, signs[0].plan.sizing);
        assert_eq!(sign.plan.profile, signs[0].plan.profile);
        assert_eq!(sign.layers.top.vertices, signs[0].layers.top.vertices);
        assert_solid(&sign.layers.top, "top");
    }

    let guard = kernel.acquire();
    assert_eq!(guard.stats().requests, 4);
    assert_eq!(guard.stats().failures, 0);
    // E, X, I, T shared by every request
    assert_eq!(guard.cached_glyphs(), 4);
}

#[test]
fn busy_kernel_is_reported() {
    let kernel = KernelHandle::new();
    let _held = kernel.acquire();
    assert!(kernel.try_acquire().is_none());
}

#[test]
fn planning_does_not_need_the_kernel() {
    let generator = SignGenerator::with_kernel(GeneratorConfig::default(), KernelHandle::new());
    let _held = generator.kernel().acquire();
    let plan = generator.plan(&request("EXIT", 100.0, 25.0)).unwrap();
    assert!(!plan.prediction.will_fail);
}

#[test]
fn failures_are_counted() {
    let generator = SignGenerator::with_kernel(GeneratorConfig::default(), KernelHandle::new());
    assert!(generator.generate(&request("☃", 100.0, 25.0)).is_err());
    assert!(generator.generate(&request("OK", 100.0, 25.0)).is_ok());
    let stats = generator.kernel().acquire().stats();
    assert_eq!(stats.requests, 2);
    assert_eq!(stats.failures, 1);
}

#[test]
fn generators_share_the_process_kernel() {
    let a = SignGenerator::new(GeneratorConfig::default());
    let b = SignGenerator::default();
    assert!(a.kernel().same_kernel(b.kernel()));
    assert!(a.kernel().same_kernel(&KernelHandle::shared()));

    let _held = a.kernel().acquire();
    assert!(b.kernel().try_acquire().is_none());
}
