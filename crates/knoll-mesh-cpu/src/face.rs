use knoll_geom::Vec3;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    PosY = 0,
    NegY = 1,
    PosX = 2,
    NegX = 3,
    PosZ = 4,
    NegZ = 5,
}

/// Gray level shared by a pair of opposite faces.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FaceShade {
    /// Top and bottom.
    Cap,
    /// Front and back (the z faces).
    Front,
    /// Left and right (the x faces).
    Side,
}

impl FaceShade {
    #[inline]
    pub fn gray(self) -> f32 {
        match self {
            FaceShade::Cap => 0.7,
            FaceShade::Front => 0.5,
            FaceShade::Side => 0.3,
        }
    }

    #[inline]
    pub fn rgba(self) -> [u8; 4] {
        let g = (self.gray() * 255.0).round() as u8;
        [g, g, g, 255]
    }
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::PosY,
        Face::NegY,
        Face::PosZ,
        Face::NegZ,
        Face::NegX,
        Face::PosX,
    ];

    /// Returns the `[0..6)` index of this face.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the unit-normal vector for this face.
    #[inline]
    pub fn normal(self) -> Vec3 {
        match self {
            Face::PosY => Vec3::new(0.0, 1.0, 0.0),
            Face::NegY => Vec3::new(0.0, -1.0, 0.0),
            Face::PosX => Vec3::new(1.0, 0.0, 0.0),
            Face::NegX => Vec3::new(-1.0, 0.0, 0.0),
            Face::PosZ => Vec3::new(0.0, 0.0, 1.0),
            Face::NegZ => Vec3::new(0.0, 0.0, -1.0),
        }
    }

    #[inline]
    pub fn shade(self) -> FaceShade {
        match self {
            Face::PosY | Face::NegY => FaceShade::Cap,
            Face::PosZ | Face::NegZ => FaceShade::Front,
            Face::PosX | Face::NegX => FaceShade::Side,
        }
    }

    /// Corners of this face on a cube of edge `s` centered at the origin,
    /// in perimeter order (winding is fixed up by the mesh builder).
    pub fn corners(self, s: f32) -> [Vec3; 4] {
        let h = s * 0.5;
        match self {
            Face::PosY => [
                Vec3::new(-h, h, -h),
                Vec3::new(h, h, -h),
                Vec3::new(h, h, h),
                Vec3::new(-h, h, h),
            ],
            Face::NegY => [
                Vec3::new(-h, -h, -h),
                Vec3::new(h, -h, -h),
                Vec3::new(h, -h, h),
                Vec3::new(-h, -h, h),
            ],
            Face::PosZ => [
                Vec3::new(-h, -h, h),
                Vec3::new(h, -h, h),
                Vec3::new(h, h, h),
                Vec3::new(-h, h, h),
            ],
            Face::NegZ => [
                Vec3::new(-h, -h, -h),
                Vec3::new(h, -h, -h),
                Vec3::new(h, h, -h),
                Vec3::new(-h, h, -h),
            ],
            Face::NegX => [
                Vec3::new(-h, -h, -h),
                Vec3::new(-h, -h, h),
                Vec3::new(-h, h, h),
                Vec3::new(-h, h, -h),
            ],
            Face::PosX => [
                Vec3::new(h, -h, -h),
                Vec3::new(h, -h, h),
                Vec3::new(h, h, h),
                Vec3::new(h, h, -h),
            ],
        }
    }
}
