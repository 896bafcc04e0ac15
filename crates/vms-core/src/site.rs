//! State behind the public landing page.
//!
//! The hero banner cycles through its slides on a fixed interval, and every
//! product and service card runs its own image rotator on a staggered
//! interval so neighbouring cards do not flip in lockstep. These types hold
//! that state; the page renderer seeds the browser with their intervals and
//! starting indices.

use std::time::Duration;

use crate::hero::{Card, CardKind, HeroConfig};

/// Hero slide auto-advance period.
pub const HERO_INTERVAL: Duration = Duration::from_millis(6000);

/// Base period and per-card stagger for product image rotators.
pub const PRODUCT_ROTATION_BASE_MS: u64 = 3000;
pub const PRODUCT_ROTATION_STAGGER_MS: u64 = 500;

/// Base period and per-card stagger for technical-service image rotators.
pub const SERVICE_ROTATION_BASE_MS: u64 = 3500;
pub const SERVICE_ROTATION_STAGGER_MS: u64 = 400;

/// Current position in the hero slide sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeroCarousel {
    index: usize,
    total: usize,
}

impl HeroCarousel {
    /// A carousel over `total` slides, starting at the first.
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self { index: 0, total }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Auto-advance runs only when there is somewhere to advance to.
    #[must_use]
    pub fn autoplay(&self) -> bool {
        self.total >= 2
    }

    /// The auto-advance period, or `None` when fewer than two slides exist.
    #[must_use]
    pub fn interval(&self) -> Option<Duration> {
        self.autoplay().then_some(HERO_INTERVAL)
    }

    /// One auto-advance step: `(index + 1) mod total`. No-op without autoplay.
    pub fn tick(&mut self) -> usize {
        if self.autoplay() {
            self.index = (self.index + 1) % self.total;
        }
        self.index
    }

    /// Manual next, wrapping to the first slide.
    pub fn next(&mut self) -> usize {
        if self.total > 0 {
            self.index = (self.index + 1) % self.total;
        }
        self.index
    }

    /// Manual previous, wrapping to the last slide.
    pub fn prev(&mut self) -> usize {
        if self.total > 0 {
            self.index = (self.index + self.total - 1) % self.total;
        }
        self.index
    }

    /// Dot navigation. Indices past the end clamp to the last slide.
    pub fn go_to(&mut self, index: usize) -> usize {
        self.index = index.min(self.total.saturating_sub(1));
        self.index
    }

    /// Follow a change in slide count, keeping the index in range.
    pub fn resize(&mut self, total: usize) {
        self.total = total;
        if self.index >= total {
            self.index = 0;
        }
    }
}

/// An independent image rotator inside one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardRotator {
    index: usize,
    images: usize,
    interval: Duration,
}

impl CardRotator {
    /// The rotator for the `position`-th card of `kind` holding `images` images.
    #[must_use]
    pub fn for_card(kind: CardKind, position: usize, images: usize) -> Self {
        Self {
            index: 0,
            images,
            interval: rotation_interval(kind, position),
        }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether this card has more than one image to rotate through.
    #[must_use]
    pub fn rotates(&self) -> bool {
        self.images >= 2
    }

    /// Advance one image, wrapping. No-op with fewer than two images.
    pub fn tick(&mut self) -> usize {
        self.step(1)
    }

    /// Manual step by `direction` (negative goes back), wrapping both ways.
    pub fn step(&mut self, direction: isize) -> usize {
        if self.rotates() {
            let n = self.images;
            let shift = direction.unsigned_abs() % n;
            self.index = if direction >= 0 {
                (self.index + shift) % n
            } else {
                (self.index + n - shift) % n
            };
        }
        self.index
    }
}

/// Rotation period for the `position`-th card of `kind`.
#[must_use]
pub fn rotation_interval(kind: CardKind, position: usize) -> Duration {
    let (base, stagger) = match kind {
        CardKind::Products => (PRODUCT_ROTATION_BASE_MS, PRODUCT_ROTATION_STAGGER_MS),
        CardKind::TechnicalServices => (SERVICE_ROTATION_BASE_MS, SERVICE_ROTATION_STAGGER_MS),
    };
    let position = u64::try_from(position).unwrap_or(u64::MAX);
    Duration::from_millis(base.saturating_add(stagger.saturating_mul(position)))
}

/// Everything the landing page needs to render one configuration.
#[derive(Debug, Clone)]
pub struct PublicView {
    pub config: HeroConfig,
    pub carousel: HeroCarousel,
    pub product_rotators: Vec<CardRotator>,
    pub service_rotators: Vec<CardRotator>,
}

impl PublicView {
    /// Build fresh view state for `config`.
    #[must_use]
    pub fn new(config: HeroConfig) -> Self {
        let rotators = |kind: CardKind, cards: &[Card]| {
            cards
                .iter()
                .enumerate()
                .map(|(i, card)| CardRotator::for_card(kind, i, card.images.len()))
                .collect()
        };
        Self {
            carousel: HeroCarousel::new(config.slides.len()),
            product_rotators: rotators(CardKind::Products, &config.products),
            service_rotators: rotators(CardKind::TechnicalServices, &config.technical_services),
            config,
        }
    }

    /// Swap in a refetched configuration, keeping the carousel position when
    /// it is still valid.
    pub fn refresh(&mut self, config: HeroConfig) {
        let mut carousel = self.carousel;
        carousel.resize(config.slides.len());
        *self = Self {
            carousel,
            ..Self::new(config)
        };
    }

    /// Rotators for one card collection.
    #[must_use]
    pub fn rotators(&self, kind: CardKind) -> &[CardRotator] {
        match kind {
            CardKind::Products => &self.product_rotators,
            CardKind::TechnicalServices => &self.service_rotators,
        }
    }
}
