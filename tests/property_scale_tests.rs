use citation_viz::core::{Domain, PixelRange, to_pixel, to_value};
use proptest::prelude::*;

proptest! {
    #[test]
    fn pixel_round_trip_property(
        domain_min in -1_000_000.0f64..1_000_000.0,
        domain_span in 0.001f64..1_000_000.0,
        value_factor in 0.0f64..1.0,
        range_start in -500.0f64..500.0,
        range_length in 1.0f64..4096.0,
        inverted in any::<bool>()
    ) {
        let domain = Domain::new(domain_min, domain_min + domain_span);
        let value = domain_min + value_factor * domain_span;
        let range = if inverted {
            PixelRange::new(range_start + range_length, range_start)
        } else {
            PixelRange::new(range_start, range_start + range_length)
        };

        let px = to_pixel(value, domain, range);
        let recovered = to_value(px, domain, range);

        prop_assert!((recovered - value).abs() <= 1e-6 * domain_span.max(1.0));
    }

    #[test]
    fn overlap_ratio_is_bounded_and_symmetric(
        a_min in -1_000.0f64..1_000.0,
        a_span in 0.0f64..1_000.0,
        b_min in -1_000.0f64..1_000.0,
        b_span in 0.0f64..1_000.0
    ) {
        let a = Domain::new(a_min, a_min + a_span);
        let b = Domain::new(b_min, b_min + b_span);
        let ab = a.overlap_ratio(b);
        let ba = b.overlap_ratio(a);

        prop_assert!((0.0..=1.0).contains(&ab));
        prop_assert!((ab - ba).abs() <= 1e-12);
    }
}
