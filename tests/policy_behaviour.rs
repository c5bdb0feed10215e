// Numeric-policy behaviour tests: per-category handling modes (raise,
// sentinel, log) across construction and every evaluation path.
//
// Exact limit values at the support edges are definitional and never consult
// the policy; these tests pin down which conditions do.

mod util;

mod policy_behaviour_tests {
    use std::cell::RefCell;
    use std::sync::Once;

    use log::{Level, LevelFilter, Log, Metadata, Record};

    use dist_kernels::{
        ChiSquared, ContinuousDistribution, DistError, Distribution, ErrorHandling, Policy,
        PrecisionHandling,
    };

    // Captures facade output into a thread-local buffer, so tests running in
    // parallel only ever observe the warnings their own thread emitted.
    struct CapturingLogger;

    thread_local! {
        static CAPTURED: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
    }

    impl Log for CapturingLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= Level::Warn
        }

        fn log(&self, record: &Record) {
            if self.enabled(record.metadata()) {
                CAPTURED.with(|buf| buf.borrow_mut().push(record.args().to_string()));
            }
        }

        fn flush(&self) {}
    }

    static LOGGER: CapturingLogger = CapturingLogger;

    fn capture_warnings() {
        static INSTALL: Once = Once::new();
        INSTALL.call_once(|| {
            log::set_logger(&LOGGER).expect("no other logger is installed in this binary");
            log::set_max_level(LevelFilter::Warn);
        });
        CAPTURED.with(|buf| buf.borrow_mut().clear());
    }

    fn drain_warnings() -> Vec<String> {
        CAPTURED.with(|buf| buf.borrow_mut().drain(..).collect())
    }

    #[test]
    fn chi2_new_rejects_zero_df() {
        let got = ChiSquared::<f64>::new(0.0);
        assert!(
            got.is_err(),
            "expected error for invalid parameters, got: {:?}",
            got
        );
    }

    #[test]
    fn chi2_new_rejects_negative_df() {
        let got = ChiSquared::<f64>::new(-2.0);
        assert!(
            got.is_err(),
            "expected error for invalid parameters, got: {:?}",
            got
        );
    }

    #[test]
    fn chi2_new_rejects_nan_df() {
        let got = ChiSquared::<f64>::new(f64::NAN);
        assert!(
            got.is_err(),
            "expected error for invalid parameters, got: {:?}",
            got
        );
    }

    #[test]
    fn chi2_new_rejects_infinite_df() {
        let got = ChiSquared::<f64>::new(f64::INFINITY);
        assert!(
            got.is_err(),
            "expected error for invalid parameters, got: {:?}",
            got
        );
    }

    // Under a sentinel domain mode, invalid construction succeeds with a
    // poisoned engine: every evaluation yields NaN rather than a wrong number.
    #[test]
    fn chi2_permissive_construction_poisons_engine() {
        let d = ChiSquared::<f64>::with_policy(-2.0, Policy::permissive()).unwrap();
        assert!(d.df().is_nan());
        assert!(d.pdf(1.0).unwrap().is_nan());
        assert!(d.ln_pdf(1.0).unwrap().is_nan());
        assert!(d.cdf(1.0).unwrap().is_nan());
        assert!(d.sf(1.0).unwrap().is_nan());
        assert!(d.quantile(0.5).unwrap().is_nan());
        assert!(d.isf(0.5).unwrap().is_nan());
        assert!(d.mean().is_nan());
        assert!(d.median().is_nan());
        assert!(d.mode().is_nan());
    }

    #[test]
    fn chi2_default_maps_out_of_support_to_limits() {
        let d = ChiSquared::<f64>::new(4.0).unwrap();
        assert_eq!(d.pdf(-1.0).unwrap(), 0.0);
        assert_eq!(d.ln_pdf(-1.0).unwrap(), f64::NEG_INFINITY);
        assert_eq!(d.cdf(-1.0).unwrap(), 0.0);
        assert_eq!(d.sf(-1.0).unwrap(), 1.0);
    }

    #[test]
    fn chi2_strict_support_rejects_out_of_support_points() {
        let d = ChiSquared::<f64>::with_policy(4.0, Policy::strict()).unwrap();
        assert!(matches!(d.pdf(-0.5), Err(DistError::Domain(_))));
        assert!(matches!(d.ln_pdf(-0.5), Err(DistError::Domain(_))));
        assert!(matches!(d.cdf(-0.5), Err(DistError::Domain(_))));
        assert!(matches!(d.sf(-0.5), Err(DistError::Domain(_))));
        // in-support evaluation is unaffected
        assert!(d.pdf(1.0).unwrap() > 0.0);
    }

    #[test]
    fn chi2_nan_input_follows_domain_mode() {
        let d = ChiSquared::<f64>::new(3.0).unwrap();
        assert!(matches!(d.pdf(f64::NAN), Err(DistError::Domain(_))));
        assert!(matches!(d.cdf(f64::NAN), Err(DistError::Domain(_))));
        assert!(matches!(d.sf(f64::NAN), Err(DistError::Domain(_))));
        assert!(matches!(d.quantile(f64::NAN), Err(DistError::Domain(_))));

        let d = ChiSquared::<f64>::with_policy(3.0, Policy::permissive()).unwrap();
        assert!(d.pdf(f64::NAN).unwrap().is_nan());
        assert!(d.cdf(f64::NAN).unwrap().is_nan());
        assert!(d.sf(f64::NAN).unwrap().is_nan());
        assert!(d.quantile(f64::NAN).unwrap().is_nan());
    }

    #[test]
    fn chi2_quantile_rejects_probability_outside_unit_interval() {
        let d = ChiSquared::<f64>::new(5.0).unwrap();
        assert!(matches!(d.quantile(-0.1), Err(DistError::Domain(_))));
        assert!(matches!(d.quantile(1.1), Err(DistError::Domain(_))));

        let d = ChiSquared::<f64>::with_policy(5.0, Policy::permissive()).unwrap();
        assert!(d.quantile(-0.1).unwrap().is_nan());
        assert!(d.quantile(1.1).unwrap().is_nan());
    }

    // p = 1 has no finite preimage: the overflow category decides between
    // +inf and an explicit error.
    #[test]
    fn chi2_quantile_p1_follows_overflow_mode() {
        let d = ChiSquared::<f64>::new(5.0).unwrap();
        assert_eq!(d.quantile(1.0).unwrap(), f64::INFINITY);

        let raise = Policy {
            overflow: ErrorHandling::Raise,
            ..Policy::default()
        };
        let d = ChiSquared::<f64>::with_policy(5.0, raise).unwrap();
        assert!(matches!(d.quantile(1.0), Err(DistError::Overflow(_))));

        let logged = Policy {
            overflow: ErrorHandling::Log,
            ..Policy::default()
        };
        let d = ChiSquared::<f64>::with_policy(5.0, logged).unwrap();
        assert_eq!(d.quantile(1.0).unwrap(), f64::INFINITY);
    }

    // df < 2 has a density pole at the origin; same overflow category.
    #[test]
    fn chi2_pdf_origin_pole_follows_overflow_mode() {
        let d = ChiSquared::<f64>::new(1.0).unwrap();
        assert_eq!(d.pdf(0.0).unwrap(), f64::INFINITY);

        let raise = Policy {
            overflow: ErrorHandling::Raise,
            ..Policy::default()
        };
        let d = ChiSquared::<f64>::with_policy(1.0, raise).unwrap();
        assert!(matches!(d.pdf(0.0), Err(DistError::Overflow(_))));
    }

    // Deep in the tail the density is mathematically positive but rounds to
    // zero; the underflow category decides, and the log form stays exact.
    #[test]
    fn chi2_pdf_deep_tail_follows_underflow_mode() {
        let d = ChiSquared::<f64>::new(3.0).unwrap();
        assert_eq!(d.pdf(1500.0).unwrap(), 0.0);

        let raise = Policy {
            underflow: ErrorHandling::Raise,
            ..Policy::default()
        };
        let d = ChiSquared::<f64>::with_policy(3.0, raise).unwrap();
        assert!(matches!(d.pdf(1500.0), Err(DistError::Underflow(_))));
        assert!(d.ln_pdf(1500.0).unwrap().is_finite());
    }

    #[test]
    fn chi2_sf_deep_tail_follows_underflow_mode() {
        let d = ChiSquared::<f64>::new(2.0).unwrap();
        assert_eq!(d.sf(1500.0).unwrap(), 0.0);

        let raise = Policy {
            underflow: ErrorHandling::Raise,
            ..Policy::default()
        };
        let d = ChiSquared::<f64>::with_policy(2.0, raise).unwrap();
        assert!(matches!(d.sf(1500.0), Err(DistError::Underflow(_))));
        // x = +inf is an exact limit, not an underflow
        assert_eq!(d.sf(f64::INFINITY).unwrap(), 0.0);
    }

    // Derived accessors inherit the same categories: deep in the tail the
    // hazard ratio degrades to the protected zero under sentinel handling
    // and surfaces the underlying underflow under raise.
    #[test]
    fn chi2_hazard_deep_tail_follows_underflow_mode() {
        let d = ChiSquared::<f64>::new(2.0).unwrap();
        assert_eq!(d.hazard(1500.0).unwrap(), 0.0);
        assert_eq!(d.chf(1500.0).unwrap(), f64::INFINITY);

        let raise = Policy {
            underflow: ErrorHandling::Raise,
            ..Policy::default()
        };
        let d = ChiSquared::<f64>::with_policy(2.0, raise).unwrap();
        assert!(matches!(d.hazard(1500.0), Err(DistError::Underflow(_))));
        assert!(matches!(d.chf(1500.0), Err(DistError::Underflow(_))));
    }

    // Precision loss is a warning category: logging mode must never change
    // the returned values.
    #[test]
    fn chi2_precision_loss_logging_never_alters_values() {
        let logged = Policy {
            precision_loss: PrecisionHandling::Log,
            ..Policy::default()
        };
        let quiet = ChiSquared::<f64>::new(2.0).unwrap();
        let loud = ChiSquared::<f64>::with_policy(2.0, logged).unwrap();

        // cdf saturates at 1 here
        assert_eq!(quiet.cdf(500.0).unwrap(), 1.0);
        assert_eq!(loud.cdf(500.0).unwrap(), quiet.cdf(500.0).unwrap());

        // p within a few ulps of 1 still yields the same finite quantile
        let p = 0.9999999999999991_f64;
        let x = quiet.quantile(p).unwrap();
        assert!(x.is_finite());
        assert_eq!(loud.quantile(p).unwrap(), x);
    }

    // Log mode has to reach the facade, not just map to the sentinel:
    // exactly one warning per consulted condition.
    #[test]
    fn chi2_log_mode_emits_one_warning_per_consult() {
        capture_warnings();
        let logged = Policy {
            domain: ErrorHandling::Log,
            overflow: ErrorHandling::Log,
            underflow: ErrorHandling::Log,
            ..Policy::default()
        };
        let d = ChiSquared::<f64>::with_policy(3.0, logged).unwrap();

        assert!(d.quantile(1.5).unwrap().is_nan());
        let warnings = drain_warnings();
        assert_eq!(warnings.len(), 1, "domain consult: {warnings:?}");
        assert!(warnings[0].contains("domain error"));
        assert!(warnings[0].contains("invalid probability"));

        assert_eq!(d.quantile(1.0).unwrap(), f64::INFINITY);
        let warnings = drain_warnings();
        assert_eq!(warnings.len(), 1, "overflow consult: {warnings:?}");
        assert!(warnings[0].contains("overflow"));

        assert_eq!(d.pdf(1500.0).unwrap(), 0.0);
        let warnings = drain_warnings();
        assert_eq!(warnings.len(), 1, "underflow consult: {warnings:?}");
        assert!(warnings[0].contains("underflow"));
    }

    #[test]
    fn chi2_sentinel_mode_consults_stay_silent() {
        capture_warnings();
        let d = ChiSquared::<f64>::with_policy(3.0, Policy::permissive()).unwrap();
        assert!(d.quantile(1.5).unwrap().is_nan());
        assert_eq!(d.quantile(1.0).unwrap(), f64::INFINITY);
        assert_eq!(d.pdf(1500.0).unwrap(), 0.0);
        assert!(drain_warnings().is_empty());
    }

    #[test]
    fn chi2_precision_loss_log_mode_warns_ignore_stays_silent() {
        capture_warnings();
        let logged = Policy {
            precision_loss: PrecisionHandling::Log,
            ..Policy::default()
        };
        let loud = ChiSquared::<f64>::with_policy(2.0, logged).unwrap();
        assert_eq!(loud.cdf(500.0).unwrap(), 1.0);
        let warnings = drain_warnings();
        assert_eq!(warnings.len(), 1, "saturated cdf: {warnings:?}");
        assert!(warnings[0].contains("precision loss"));

        // Ignore (the default) consults the same condition without a word.
        let quiet = ChiSquared::<f64>::new(2.0).unwrap();
        assert_eq!(quiet.cdf(500.0).unwrap(), 1.0);
        assert!(drain_warnings().is_empty());
    }

    // The engine is a plain Copy value: shareable across threads and
    // deterministic with no interior state.
    #[test]
    fn chi2_engine_is_send_sync_copy_and_deterministic() {
        fn assert_send_sync_copy<D: Send + Sync + Copy>(_: D) {}
        let d = ChiSquared::<f64>::new(4.0).unwrap();
        assert_send_sync_copy(d);

        let worker = d;
        let handle = std::thread::spawn(move || worker.cdf(1.0).unwrap());
        let from_thread = handle.join().unwrap();
        assert_eq!(from_thread, d.cdf(1.0).unwrap());
    }
}
