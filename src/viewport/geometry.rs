use crate::foundation::core::clamp_fraction;

/// Index of an observed region within its scene.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct RegionId(pub u32);

/// A vertical band of the document, in abstract document units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Region {
    /// Region identity.
    pub id: RegionId,
    /// Top edge.
    pub top: f64,
    /// Height; zero-height regions are treated as a line.
    pub height: f64,
}

impl Region {
    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.top + self.height.max(0.0)
    }
}

/// One visibility observation for one region.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct IntersectionEntry {
    /// Region the observation is about.
    pub region: RegionId,
    /// Fraction of the region inside the viewport, in `[0, 1]`.
    pub ratio: f64,
    /// Whether the region touches the viewport at all.
    pub intersecting: bool,
}

/// The visible window onto the document.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Viewport {
    /// Scroll offset of the top edge.
    pub offset: f64,
    /// Visible height.
    pub height: f64,
}

impl Viewport {
    /// Viewport of `height` scrolled to `offset`.
    pub fn new(offset: f64, height: f64) -> Self {
        Self {
            offset,
            height: height.max(0.0),
        }
    }

    /// Bottom edge of the visible window.
    pub fn bottom(&self) -> f64 {
        self.offset + self.height
    }

    /// Same viewport scrolled to `offset`.
    pub fn scrolled_to(self, offset: f64) -> Self {
        Self { offset, ..self }
    }

    /// Fraction of `region` inside the viewport.
    pub fn visible_fraction(&self, region: &Region) -> f64 {
        if region.height <= 0.0 {
            let inside = region.top >= self.offset && region.top <= self.bottom();
            return if inside { 1.0 } else { 0.0 };
        }
        let overlap = region.bottom().min(self.bottom()) - region.top.max(self.offset);
        clamp_fraction(overlap / region.height)
    }

    /// Observe one region.
    pub fn entry(&self, region: &Region) -> IntersectionEntry {
        IntersectionEntry {
            region: region.id,
            ratio: self.visible_fraction(region),
            intersecting: region.top <= self.bottom() && region.bottom() >= self.offset,
        }
    }

    /// Observe every region, in input order.
    pub fn observe<'a>(&self, regions: impl IntoIterator<Item = &'a Region>) -> Vec<IntersectionEntry> {
        regions.into_iter().map(|r| self.entry(r)).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/viewport/geometry.rs"]
mod tests;
