#![allow(clippy::float_cmp)]

use rand::SeedableRng;
use rand::rngs::StdRng;
use uuid::Uuid;

use super::*;
use crate::doc::Edge;

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

fn set_with_room() -> (RoomSet, RoomId) {
    let mut set = RoomSet::default();
    let id = set.create_room();
    (set, id)
}

fn assert_all_contained(set: &RoomSet) {
    for room in set.iter() {
        let bounds = room.size();
        for block in room.blocks() {
            assert!(block.rect().fits_within(bounds), "block {:?} escapes {bounds:?}", block.rect());
        }
    }
}

// =============================================================
// Limits and parsing
// =============================================================

#[test]
fn clamp_side_bounds() {
    let limits = RoomLimits::default();
    assert_eq!(limits.clamp_side(5000), 2000);
    assert_eq!(limits.clamp_side(100), 400);
    assert_eq!(limits.clamp_side(-7), 400);
    assert_eq!(limits.clamp_side(1234), 1234);
}

#[test]
fn parse_dimension_accepts_integers_and_truncates() {
    assert_eq!(parse_dimension(Some("640")), Ok(640));
    assert_eq!(parse_dimension(Some(" 512 ")), Ok(512));
    assert_eq!(parse_dimension(Some("700.9")), Ok(700));
}

#[test]
fn parse_dimension_reads_leading_integer_only() {
    assert_eq!(parse_dimension(Some("1e3")), Ok(1));
    assert_eq!(parse_dimension(Some("640px")), Ok(640));
    assert_eq!(parse_dimension(Some("+512")), Ok(512));
    assert_eq!(parse_dimension(Some("-20")), Ok(-20));
    assert_eq!(parse_dimension(Some("99999999999999999999999")), Ok(i64::MAX));
    assert!(matches!(parse_dimension(Some("-")), Err(EditError::InvalidDimension(_))));
    assert!(matches!(parse_dimension(Some(".5")), Err(EditError::InvalidDimension(_))));
}

#[test]
fn limits_default_is_valid() {
    assert!(RoomLimits::default().is_valid());
}

#[test]
fn limits_min_side_must_hold_block_and_door() {
    let block_sized = RoomLimits { min_side: 50, ..RoomLimits::default() };
    assert!(!block_sized.is_valid());
    let door_sized = RoomLimits { min_side: 60, ..RoomLimits::default() };
    assert!(door_sized.is_valid());
    let big_blocks = RoomLimits { min_side: 100, block_side: 150.0, ..RoomLimits::default() };
    assert!(!big_blocks.is_valid());
}

#[test]
fn limits_defaults_must_lie_in_range() {
    let narrow = RoomLimits { min_side: 900, ..RoomLimits::default() };
    assert!(!narrow.is_valid());
    let inverted = RoomLimits { min_side: 2500, max_side: 1000, ..RoomLimits::default() };
    assert!(!inverted.is_valid());
}

#[test]
fn parse_dimension_cancelled() {
    assert_eq!(parse_dimension(None), Err(EditError::Cancelled));
}

#[test]
fn parse_dimension_rejects_garbage() {
    assert!(matches!(parse_dimension(Some("wide")), Err(EditError::InvalidDimension(_))));
    assert!(matches!(parse_dimension(Some("")), Err(EditError::InvalidDimension(_))));
    assert!(matches!(parse_dimension(Some("NaN")), Err(EditError::InvalidDimension(_))));
    assert!(matches!(parse_dimension(Some("inf")), Err(EditError::InvalidDimension(_))));
}

// =============================================================
// Construction
// =============================================================

#[test]
fn default_set_is_empty() {
    let set = RoomSet::default();
    assert!(set.is_empty());
    assert!(set.current_id().is_none());
    assert!(set.current().is_none());
}

#[test]
fn with_default_room_has_room_1_and_door() {
    let set = RoomSet::with_default_room(RoomLimits::default());
    let room = set.current().unwrap();
    assert_eq!(room.name(), "Room 1");
    assert_eq!((room.width(), room.height()), (800, 600));
    assert_eq!(room.door().unwrap().edge(), Edge::Left);
}

#[test]
fn from_rooms_keeps_valid_current() {
    let a = Room::new("a", 800, 600);
    let b = Room::new("b", 800, 600);
    let b_id = b.id();
    let set = RoomSet::from_rooms(vec![a, b], Some(b_id), RoomLimits::default());
    assert_eq!(set.current_id(), Some(b_id));
}

#[test]
fn from_rooms_unknown_current_falls_back_to_first() {
    let a = Room::new("a", 800, 600);
    let a_id = a.id();
    let set = RoomSet::from_rooms(vec![a], Some(Uuid::new_v4()), RoomLimits::default());
    assert_eq!(set.current_id(), Some(a_id));
}

#[test]
fn from_rooms_empty_has_no_current() {
    let set = RoomSet::from_rooms(vec![], Some(Uuid::new_v4()), RoomLimits::default());
    assert!(set.current_id().is_none());
}

#[test]
fn from_rooms_conforms_out_of_range_rooms() {
    let mut room = Room::new("odd", 50, 7000);
    room.push_block(Block::new(Point::new(900.0, -40.0), Size::new(50.0, 50.0)));
    room.push_block(Block::new(Point::new(0.0, 0.0), Size::new(500.0, 50.0)));
    room.set_door(Some(Door::new(Point::new(400.0, 400.0), Edge::Left)));
    let set = RoomSet::from_rooms(vec![room], None, RoomLimits::default());

    let loaded = set.current().unwrap();
    assert_eq!((loaded.width(), loaded.height()), (400, 2000));
    assert_eq!(loaded.blocks().len(), 1);
    assert_eq!(loaded.blocks()[0].origin(), Point::new(350.0, 0.0));
    assert_eq!(loaded.door().unwrap().origin(), Point::new(0.0, 400.0));
    assert_all_contained(&set);
}

#[test]
fn from_rooms_leaves_valid_rooms_alone() {
    let mut room = Room::new("fine", 800, 600);
    room.push_block(Block::new(Point::new(120.0, 80.0), Size::new(50.0, 50.0)));
    room.set_door(Some(Door::new(Point::new(300.0, 590.0), Edge::Bottom)));
    let before = room.clone();
    let set = RoomSet::from_rooms(vec![room], None, RoomLimits::default());
    assert_eq!(set.current(), Some(&before));
}

#[test]
fn from_rooms_drops_duplicate_ids() {
    let a = Room::new("a", 800, 600);
    let dup = a.clone();
    let set = RoomSet::from_rooms(vec![a, dup], None, RoomLimits::default());
    assert_eq!(set.len(), 1);
}

// =============================================================
// create / select
// =============================================================

#[test]
fn create_room_defaults() {
    let (set, id) = set_with_room();
    let room = set.get(&id).unwrap();
    assert_eq!(room.name(), "Room 1");
    assert_eq!((room.width(), room.height()), (800, 600));
    assert!(room.blocks().is_empty());
    let door = room.door().unwrap();
    assert_eq!(door.edge(), Edge::Left);
    assert_eq!(door.origin(), Point::new(0.0, 300.0));
    assert_eq!(set.current_id(), Some(id));
}

#[test]
fn create_room_numbers_by_count_and_selects_newest() {
    let mut set = RoomSet::default();
    set.create_room();
    let second = set.create_room();
    assert_eq!(set.get(&second).unwrap().name(), "Room 2");
    assert_eq!(set.current_id(), Some(second));
}

#[test]
fn select_switches_current() {
    let mut set = RoomSet::default();
    let first = set.create_room();
    set.create_room();
    set.select(&first).unwrap();
    assert_eq!(set.current_id(), Some(first));
}

#[test]
fn select_unknown_is_error_and_noop() {
    let (mut set, id) = set_with_room();
    let bogus = Uuid::new_v4();
    assert_eq!(set.select(&bogus), Err(EditError::RoomNotFound(bogus)));
    assert_eq!(set.current_id(), Some(id));
}

#[test]
fn tabs_follow_order_and_flag_current() {
    let mut set = RoomSet::default();
    let first = set.create_room();
    let second = set.create_room();
    let tabs = set.tabs();
    assert_eq!(tabs.len(), 2);
    assert_eq!(tabs[0].id, first);
    assert!(!tabs[0].is_current);
    assert_eq!(tabs[1].id, second);
    assert!(tabs[1].is_current);
    assert_eq!(set.id_at(1), Some(second));
    assert_eq!(set.id_at(2), None);
}

// =============================================================
// Blocks
// =============================================================

#[test]
fn add_block_places_default_block_inside() {
    let (mut set, id) = set_with_room();
    let mut rng = rng();
    for _ in 0..200 {
        set.add_block(&id, &mut rng).unwrap();
    }
    let room = set.get(&id).unwrap();
    assert_eq!(room.blocks().len(), 200);
    for block in room.blocks() {
        assert_eq!(block.size(), Size::new(50.0, 50.0));
        assert!(!block.is_on());
        assert!(!block.is_empty());
    }
    assert_all_contained(&set);
}

#[test]
fn add_empty_block_is_flagged_empty() {
    let (mut set, id) = set_with_room();
    let block_id = set.add_empty_block(&id, &mut rng()).unwrap();
    assert!(set.get(&id).unwrap().block(&block_id).unwrap().is_empty());
    assert_all_contained(&set);
}

#[test]
fn add_block_without_rooms_is_no_room() {
    let mut set = RoomSet::default();
    assert_eq!(set.add_block(&Uuid::new_v4(), &mut rng()), Err(EditError::NoRoom));
}

#[test]
fn add_block_unknown_room() {
    let (mut set, _) = set_with_room();
    let bogus = Uuid::new_v4();
    assert_eq!(set.add_block(&bogus, &mut rng()), Err(EditError::RoomNotFound(bogus)));
}

#[test]
fn toggle_block_flips_and_reports_state() {
    let (mut set, id) = set_with_room();
    let block_id = set.add_block(&id, &mut rng()).unwrap();
    assert_eq!(set.toggle_block(&id, &block_id), Ok(true));
    assert_eq!(set.toggle_block(&id, &block_id), Ok(false));
}

#[test]
fn toggle_empty_block_is_refused_repeatedly() {
    let (mut set, id) = set_with_room();
    let block_id = set.add_empty_block(&id, &mut rng()).unwrap();
    for _ in 0..3 {
        assert_eq!(set.toggle_block(&id, &block_id), Err(EditError::EmptyBlock(block_id)));
        assert!(!set.get(&id).unwrap().block(&block_id).unwrap().is_on());
    }
}

#[test]
fn toggle_unknown_block() {
    let (mut set, id) = set_with_room();
    let bogus = Uuid::new_v4();
    assert_eq!(set.toggle_block(&id, &bogus), Err(EditError::BlockNotFound(bogus)));
}

#[test]
fn delete_block_removes_empty_and_regular() {
    let (mut set, id) = set_with_room();
    let mut rng = rng();
    let regular = set.add_block(&id, &mut rng).unwrap();
    let empty = set.add_empty_block(&id, &mut rng).unwrap();
    assert_eq!(set.delete_block(&id, &empty).unwrap().id(), empty);
    assert_eq!(set.delete_block(&id, &regular).unwrap().id(), regular);
    assert!(set.get(&id).unwrap().blocks().is_empty());
    assert_eq!(set.delete_block(&id, &regular), Err(EditError::BlockNotFound(regular)));
}

// =============================================================
// resize
// =============================================================

#[test]
fn resize_clamps_each_side() {
    let (mut set, id) = set_with_room();
    assert_eq!(set.resize_room(&id, 5000, 100), Ok((2000, 400)));
    let room = set.get(&id).unwrap();
    assert_eq!((room.width(), room.height()), (2000, 400));

    assert_eq!(set.resize_room(&id, 100, 5000), Ok((400, 2000)));
}

#[test]
fn resize_keeps_blocks_contained() {
    let (mut set, id) = set_with_room();
    let mut rng = rng();
    for _ in 0..50 {
        set.add_block(&id, &mut rng).unwrap();
    }
    set.resize_room(&id, 400, 400).unwrap();
    assert_all_contained(&set);
}

#[test]
fn resize_unknown_room() {
    let (mut set, _) = set_with_room();
    let bogus = Uuid::new_v4();
    assert_eq!(set.resize_room(&bogus, 900, 900), Err(EditError::RoomNotFound(bogus)));
}

#[test]
fn custom_limits_apply() {
    let limits = RoomLimits { min_side: 300, max_side: 1000, ..RoomLimits::default() };
    let mut set = RoomSet::new(limits);
    let id = set.create_room();
    assert_eq!(set.resize_room(&id, 10, 10_000), Ok((300, 1000)));
}

// =============================================================
// rename
// =============================================================

#[test]
fn rename_sets_name() {
    let (mut set, id) = set_with_room();
    set.rename_room(&id, "Kitchen").unwrap();
    assert_eq!(set.get(&id).unwrap().name(), "Kitchen");
}

#[test]
fn rename_rejects_blank() {
    let (mut set, id) = set_with_room();
    assert_eq!(set.rename_room(&id, ""), Err(EditError::EmptyName));
    assert_eq!(set.rename_room(&id, "   "), Err(EditError::EmptyName));
    assert_eq!(set.get(&id).unwrap().name(), "Room 1");
}

// =============================================================
// duplicate
// =============================================================

#[test]
fn duplicate_deep_copies_blocks_and_door() {
    let (mut set, id) = set_with_room();
    let mut rng = rng();
    let a = set.add_block(&id, &mut rng).unwrap();
    set.add_block(&id, &mut rng).unwrap();

    let copy_id = set.duplicate_room(&id).unwrap();
    assert_ne!(copy_id, id);
    assert_eq!(set.current_id(), Some(copy_id));
    assert_eq!(set.len(), 2);

    let original = set.get(&id).unwrap().clone();
    let copy = set.get(&copy_id).unwrap();
    assert_eq!(copy.name(), "Room 1 (copy)");
    assert_eq!(copy.blocks().len(), 2);
    assert_eq!(copy.blocks(), original.blocks());
    assert_eq!(copy.door(), original.door());

    set.current_mut().unwrap().move_block(&a, Point::new(0.0, 0.0));
    assert_eq!(set.get(&id).unwrap().block(&a), original.block(&a));
    assert_ne!(set.get(&copy_id).unwrap().block(&a), original.block(&a));
}

#[test]
fn duplicate_appends_at_end() {
    let mut set = RoomSet::default();
    let first = set.create_room();
    let second = set.create_room();
    let copy = set.duplicate_room(&first).unwrap();
    let order: Vec<RoomId> = set.tabs().iter().map(|t| t.id).collect();
    assert_eq!(order, vec![first, second, copy]);
}

// =============================================================
// delete
// =============================================================

#[test]
fn delete_only_room_clears_current_and_blocks_adds() {
    let (mut set, id) = set_with_room();
    set.delete_room(&id).unwrap();
    assert!(set.is_empty());
    assert!(set.current_id().is_none());
    assert_eq!(set.add_block(&id, &mut rng()), Err(EditError::NoRoom));
}

#[test]
fn delete_current_selects_first_remaining() {
    let mut set = RoomSet::default();
    let first = set.create_room();
    set.create_room();
    let third = set.create_room();
    set.delete_room(&third).unwrap();
    assert_eq!(set.current_id(), Some(first));
}

#[test]
fn delete_non_current_keeps_selection() {
    let mut set = RoomSet::default();
    let first = set.create_room();
    let second = set.create_room();
    set.delete_room(&first).unwrap();
    assert_eq!(set.current_id(), Some(second));
    assert_eq!(set.len(), 1);
}

#[test]
fn delete_unknown_room() {
    let (mut set, _) = set_with_room();
    let bogus = Uuid::new_v4();
    assert!(matches!(set.delete_room(&bogus), Err(EditError::RoomNotFound(_))));
    assert_eq!(set.len(), 1);
}

#[test]
fn delete_with_no_rooms_is_no_room() {
    let mut set = RoomSet::default();
    assert!(matches!(set.delete_room(&Uuid::new_v4()), Err(EditError::NoRoom)));
}

// =============================================================
// ensure_current_door
// =============================================================

#[test]
fn ensure_current_door_adds_missing_door_once() {
    let room = Room::new("bare", 800, 600);
    let mut set = RoomSet::from_rooms(vec![room], None, RoomLimits::default());
    assert!(set.ensure_current_door());
    assert!(!set.ensure_current_door());
    assert_eq!(set.current().unwrap().door(), Some(&Door::default_for_room()));
}

#[test]
fn ensure_current_door_without_rooms() {
    let mut set = RoomSet::default();
    assert!(!set.ensure_current_door());
}
