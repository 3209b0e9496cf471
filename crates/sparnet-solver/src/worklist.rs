//! Arena of simulation units addressed by stable handles.

use std::fmt;

use crate::unit::SimulationUnit;

/// Handle to a slot in a [`WorkList`]. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId(usize);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Units awaiting reduction.
///
/// Consumed units leave an empty slot behind and merged units are appended,
/// so a [`UnitId`] stays valid (or dead) for the life of the list. A unit
/// reduced on its own is put back in its own slot with [`WorkList::replace`].
#[derive(Debug, Clone, Default)]
pub struct WorkList {
    slots: Vec<Option<SimulationUnit>>,
}

impl WorkList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a unit and return its handle.
    pub fn push(&mut self, unit: SimulationUnit) -> UnitId {
        self.slots.push(Some(unit));
        UnitId(self.slots.len() - 1)
    }

    /// The unit at `id`, if it is still live.
    pub fn get(&self, id: UnitId) -> Option<&SimulationUnit> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Remove and return the unit at `id`, leaving a tombstone.
    pub fn take(&mut self, id: UnitId) -> Option<SimulationUnit> {
        self.slots.get_mut(id.0).and_then(Option::take)
    }

    /// Store `unit` in the slot of `id`, returning what was there.
    ///
    /// Panics if `id` was not issued by this list.
    pub fn replace(&mut self, id: UnitId, unit: SimulationUnit) -> Option<SimulationUnit> {
        self.slots[id.0].replace(unit)
    }

    /// Live units in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (UnitId, &SimulationUnit)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|unit| (UnitId(i), unit)))
    }

    /// Number of live units.
    pub fn live(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Total port count over live units.
    pub fn total_ports(&self) -> usize {
        self.iter().map(|(_, unit)| unit.nports()).sum()
    }

    /// Consume the list, yielding the live units in order.
    pub fn into_live(self) -> impl Iterator<Item = SimulationUnit> {
        self.slots.into_iter().flatten()
    }
}

impl FromIterator<SimulationUnit> for WorkList {
    fn from_iter<I: IntoIterator<Item = SimulationUnit>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().map(Some).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;
    use sparnet_core::NetId;
    use sparnet_devices::SMatrix;
    use std::sync::Arc;

    fn unit(nets: &[i64]) -> SimulationUnit {
        let s = SMatrix::from_fn(1, nets.len(), |_, _, _| Complex64::new(0.0, 0.0));
        SimulationUnit::new(
            nets.iter().copied().map(NetId::new).collect(),
            Arc::from(vec![1.0]),
            s,
        )
        .unwrap()
    }

    #[test]
    fn test_handles_survive_removal() {
        let mut list: WorkList = [unit(&[0]), unit(&[0, 1]), unit(&[1])].into_iter().collect();
        assert_eq!(list.live(), 3);
        assert_eq!(list.total_ports(), 4);

        let first = list.take(UnitId(0)).unwrap();
        assert_eq!(first.nets(), &[NetId::new(0)]);
        assert!(list.get(UnitId(0)).is_none());
        assert!(list.take(UnitId(0)).is_none());

        let appended = list.push(unit(&[-1]));
        assert_eq!(appended, UnitId(3));
        assert_eq!(list.get(UnitId(2)).unwrap().nets(), &[NetId::new(1)]);

        let ids: Vec<UnitId> = list.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![UnitId(1), UnitId(2), UnitId(3)]);
        assert_eq!(list.into_live().count(), 3);
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut list: WorkList = [unit(&[0, 0]), unit(&[1])].into_iter().collect();
        let taken = list.take(UnitId(0)).unwrap();
        assert_eq!(taken.nports(), 2);

        assert!(list.replace(UnitId(0), unit(&[-1])).is_none());
        let order: Vec<Vec<NetId>> = list.iter().map(|(_, u)| u.nets().to_vec()).collect();
        assert_eq!(order, vec![vec![NetId::new(-1)], vec![NetId::new(1)]]);

        let previous = list.replace(UnitId(1), unit(&[2])).unwrap();
        assert_eq!(previous.nets(), &[NetId::new(1)]);
        assert_eq!(list.live(), 2);
    }
}
