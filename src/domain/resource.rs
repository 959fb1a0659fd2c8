use crate::domain::ingredient::StorageArea;

/// The closed set of capacity-limited kitchen resources.
///
/// Capacities are fixed at construction of the pool and never change
/// during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Pantry,
    Fridge,
    Bowl,
    Spoon,
    Mixer,
    Oven,
}

pub const RESOURCE_COUNT: usize = 6;

/// The three tools a baker must hold simultaneously while mixing.
pub const MIXING_TOOLS: [ResourceKind; 3] = [ResourceKind::Bowl, ResourceKind::Spoon, ResourceKind::Mixer];

impl ResourceKind {
    pub const ALL: [ResourceKind; RESOURCE_COUNT] = [
        ResourceKind::Pantry,
        ResourceKind::Fridge,
        ResourceKind::Bowl,
        ResourceKind::Spoon,
        ResourceKind::Mixer,
        ResourceKind::Oven,
    ];

    pub fn capacity(&self) -> u32 {
        match self {
            ResourceKind::Pantry => 1,
            ResourceKind::Fridge => 2,
            ResourceKind::Bowl => 3,
            ResourceKind::Spoon => 5,
            ResourceKind::Mixer => 2,
            ResourceKind::Oven => 1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Pantry => "Pantry",
            ResourceKind::Fridge => "Refrigerator",
            ResourceKind::Bowl => "Bowl",
            ResourceKind::Spoon => "Spoon",
            ResourceKind::Mixer => "Mixer",
            ResourceKind::Oven => "Oven",
        }
    }

    // Stable position in the pool's counter array.
    pub(crate) fn index(&self) -> usize {
        match self {
            ResourceKind::Pantry => 0,
            ResourceKind::Fridge => 1,
            ResourceKind::Bowl => 2,
            ResourceKind::Spoon => 3,
            ResourceKind::Mixer => 4,
            ResourceKind::Oven => 5,
        }
    }

    /// The resource a baker must hold while grabbing from a storage area.
    pub fn for_storage_area(area: StorageArea) -> ResourceKind {
        match area {
            StorageArea::Pantry => ResourceKind::Pantry,
            StorageArea::Fridge => ResourceKind::Fridge,
        }
    }
}
