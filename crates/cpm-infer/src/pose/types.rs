use cpm_base::Tensor;

/// Number of body parts in the LEEDS sports pose format
pub const LEEDS_PART_COUNT: usize = 14;

/// Skeleton edges as (part, part) index pairs into a person's parts
pub const LIMBS: [(usize, usize); 9] = [
    (0, 1),
    (2, 3),
    (3, 4),
    (5, 6),
    (6, 7),
    (8, 9),
    (9, 10),
    (11, 12),
    (12, 13),
];

/// RGB color per limb, indexed like [`LIMBS`]
pub const LIMB_COLORS: [[u8; 3]; LIMBS.len()] = [
    [0, 0, 255],
    [0, 170, 255],
    [0, 255, 170],
    [0, 255, 0],
    [170, 255, 0],
    [255, 170, 0],
    [255, 0, 0],
    [255, 0, 170],
    [170, 0, 255],
];

/// Anchor pixel of a detected person, in the person-network input frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Center {
    pub row: usize,
    pub col: usize,
}

impl Center {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Location of one body part in source-image pixels.
///
/// Signed: a part found near the border of a person's crop can land outside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartLocation {
    pub row: i32,
    pub col: i32,
}

/// All part locations for one detected person
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub center: Center,
    pub parts: Vec<PartLocation>,
}

impl Person {
    pub fn part(&self, index: PartIndex) -> Option<&PartLocation> {
        self.parts.get(usize::from(index))
    }

    /// Endpoints of every limb whose two parts are present
    pub fn limb_segments(&self) -> impl Iterator<Item = (usize, PartLocation, PartLocation)> + '_ {
        LIMBS.iter().enumerate().filter_map(|(limb, &(a, b))| {
            Some((limb, *self.parts.get(a)?, *self.parts.get(b)?))
        })
    }
}

/// LEEDS body part indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartIndex {
    RightAnkle = 0,
    RightKnee = 1,
    RightHip = 2,
    LeftHip = 3,
    LeftKnee = 4,
    LeftAnkle = 5,
    RightWrist = 6,
    RightElbow = 7,
    RightShoulder = 8,
    LeftShoulder = 9,
    LeftElbow = 10,
    LeftWrist = 11,
    Neck = 12,
    HeadTop = 13,
}

impl From<PartIndex> for usize {
    fn from(index: PartIndex) -> usize {
        index as usize
    }
}

impl TryFrom<usize> for PartIndex {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        use PartIndex::*;
        const ALL: [PartIndex; LEEDS_PART_COUNT] = [
            RightAnkle,
            RightKnee,
            RightHip,
            LeftHip,
            LeftKnee,
            LeftAnkle,
            RightWrist,
            RightElbow,
            RightShoulder,
            LeftShoulder,
            LeftElbow,
            LeftWrist,
            Neck,
            HeadTop,
        ];
        ALL.get(value).copied().ok_or_else(|| {
            format!(
                "Invalid part index: {}. Must be in range 0-{}.",
                value,
                LEEDS_PART_COUNT - 1
            )
        })
    }
}

/// Pose-network inputs for a batch of people
#[derive(Debug, Clone, PartialEq)]
pub struct PoseInput {
    /// `[N, H, W, 3]` person-centered crops
    pub images: Tensor<f32>,
    /// `[N, H, W, 1]` Gaussian center maps
    pub center_maps: Tensor<f32>,
    /// Slots holding a real person; the rest of the batch is zero
    pub people: usize,
}

/// Pack part locations into a `[people, parts, 2]` tensor of (row, col)
pub fn parts_to_tensor(people: &[Person]) -> Tensor<i32> {
    let num_parts = people.first().map_or(0, |p| p.parts.len());
    let data = people
        .iter()
        .flat_map(|p| p.parts.iter().flat_map(|loc| [loc.row, loc.col]))
        .collect();
    Tensor {
        shape: vec![people.len(), num_parts, 2],
        data,
    }
}
