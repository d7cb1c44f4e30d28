use log::debug;
use rand::Rng;
use web_sys::{Element, HtmlElement};

use crate::config::PageConfig;
use crate::dom::{apply_style, create, Page};
use crate::error::InteractionError;
use crate::style::{BeanLayer, BEAN_LAYER_CLASS, FLOAT_KEYFRAMES};

pub const MIN_DURATION_SECS: f64 = 8.0;
pub const DURATION_SPREAD_SECS: f64 = 4.0;
pub const MAX_DELAY_SECS: f64 = 5.0;

/// One randomized decorative bean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeanSpec {
    pub duration_secs: f64,
    pub top_pct: f64,
    pub left_pct: f64,
    pub delay_secs: f64,
}

impl BeanSpec {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            duration_secs: MIN_DURATION_SECS + rng.gen::<f64>() * DURATION_SPREAD_SECS,
            top_pct: rng.gen::<f64>() * 100.0,
            left_pct: rng.gen::<f64>() * 100.0,
            delay_secs: rng.gen::<f64>() * MAX_DELAY_SECS,
        }
    }
}

pub fn generate<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<BeanSpec> {
    (0..count).map(|_| BeanSpec::random(&mut *rng)).collect()
}

/// The floating bean layer plus its keyframes. Both are removed again on
/// teardown.
pub struct Beans {
    layer: HtmlElement,
    keyframes: Option<Element>,
}

impl Beans {
    pub fn attach<R: Rng + ?Sized>(
        page: &Page,
        config: &PageConfig,
        rng: &mut R,
    ) -> Result<Self, InteractionError> {
        let keyframes = match page.document.head() {
            Some(head) => {
                let style = page.document.create_element("style")?;
                style.set_text_content(Some(FLOAT_KEYFRAMES));
                head.append_child(&style)?;
                Some(style)
            }
            None => None,
        };

        let layer = create(page, "div")?;
        layer.set_class_name(BEAN_LAYER_CLASS);
        apply_style(&layer, &BeanLayer)?;

        let specs = generate(rng, config.bean_count);
        for spec in &specs {
            let bean = create(page, "div")?;
            apply_style(&bean, spec)?;
            layer.append_child(&bean)?;
        }
        page.body.append_child(&layer)?;
        debug!("Added {} coffee beans", specs.len());

        Ok(Self { layer, keyframes })
    }
}

impl Drop for Beans {
    fn drop(&mut self) {
        self.layer.remove();
        if let Some(style) = self.keyframes.take() {
            style.remove();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn generates_requested_count() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(generate(&mut rng, 5).len(), 5);
        assert!(generate(&mut rng, 0).is_empty());
    }

    #[test]
    fn every_bean_is_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for bean in generate(&mut rng, 500) {
            assert!((8.0..=12.0).contains(&bean.duration_secs), "{:?}", bean);
            assert!((0.0..=5.0).contains(&bean.delay_secs), "{:?}", bean);
            assert!((0.0..=100.0).contains(&bean.top_pct), "{:?}", bean);
            assert!((0.0..=100.0).contains(&bean.left_pct), "{:?}", bean);
        }
    }

    #[test]
    fn zero_source_gives_lower_bounds() {
        let mut rng = StepRng::new(0, 0);
        let bean = BeanSpec::random(&mut rng);
        assert_eq!(
            bean,
            BeanSpec { duration_secs: 8.0, top_pct: 0.0, left_pct: 0.0, delay_secs: 0.0 }
        );
    }

    #[test]
    fn saturated_source_stays_within_upper_bounds() {
        let mut rng = StepRng::new(u64::MAX, 0);
        let bean = BeanSpec::random(&mut rng);
        // The top float rounds up to the closed bound for the duration.
        assert!(bean.duration_secs <= 12.0 && bean.duration_secs > 11.99);
        assert!(bean.delay_secs <= 5.0 && bean.delay_secs > 4.99);
        assert!(bean.top_pct <= 100.0 && bean.left_pct <= 100.0);
    }

    #[test]
    fn same_seed_same_layout() {
        let a = generate(&mut StdRng::seed_from_u64(3), 5);
        let b = generate(&mut StdRng::seed_from_u64(3), 5);
        assert_eq!(a, b);
    }

    #[test]
    fn beans_are_independent() {
        let beans = generate(&mut StdRng::seed_from_u64(11), 5);
        assert!(beans.windows(2).all(|pair| pair[0] != pair[1]));
    }
}
