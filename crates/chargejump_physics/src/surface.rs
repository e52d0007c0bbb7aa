//! Surface flags attached to platform colliders

use bitflags::bitflags;

bitflags! {
    /// Per-platform surface behavior
    ///
    /// A platform may combine flags, e.g. an icy one-way ledge.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct SurfaceFlags: u8 {
        /// Solid only when landed on from above
        const ONE_WAY = 1 << 0;
        /// Low friction, reduced control, no landing slide
        const ICE = 1 << 1;
        /// Participates in collision at all
        const COLLIDABLE = 1 << 2;
    }
}

impl Default for SurfaceFlags {
    fn default() -> Self {
        Self::COLLIDABLE
    }
}

impl SurfaceFlags {
    #[inline]
    pub fn is_one_way(self) -> bool {
        self.contains(Self::ONE_WAY)
    }

    #[inline]
    pub fn is_ice(self) -> bool {
        self.contains(Self::ICE)
    }

    #[inline]
    pub fn is_collidable(self) -> bool {
        self.contains(Self::COLLIDABLE)
    }
}
