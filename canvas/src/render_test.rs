use super::*;
use crate::doc::{Door, Edge};
use crate::geom::{Point, Size};

fn room() -> Room {
    Room::new("r", 800, 600)
}

// =============================================================
// Paint
// =============================================================

#[test]
fn paint_css_colors() {
    assert_eq!(Paint::BlockOff.css(), "#0000FF");
    assert_eq!(Paint::BlockOn.css(), "#00FF00");
    assert_eq!(Paint::BlockEmpty.css(), "#808080");
    assert_eq!(Paint::Door.css(), "#8B4513");
    assert_eq!(Paint::Outline.css(), "#000000");
}

#[test]
fn paint_for_block_states() {
    let mut block = Block::new(Point::new(0.0, 0.0), Size::new(50.0, 50.0));
    assert_eq!(Paint::for_block(&block), Paint::BlockOff);
    block.toggle();
    assert_eq!(Paint::for_block(&block), Paint::BlockOn);
    let empty = Block::new_empty(Point::new(0.0, 0.0), Size::new(50.0, 50.0));
    assert_eq!(Paint::for_block(&empty), Paint::BlockEmpty);
}

// =============================================================
// draw
// =============================================================

#[test]
fn draw_empty_room_only_clears() {
    let mut list = CommandList::new();
    draw(&mut list, &room());
    assert_eq!(list.commands, vec![DrawCommand::Clear { width: 800.0, height: 600.0 }]);
}

#[test]
fn draw_blocks_in_insertion_order_then_door() {
    let mut r = room();
    let a = Block::new(Point::new(10.0, 10.0), Size::new(50.0, 50.0));
    let b = Block::new_empty(Point::new(30.0, 30.0), Size::new(50.0, 50.0));
    let (ra, rb) = (a.rect(), b.rect());
    r.push_block(a);
    r.push_block(b);
    r.set_door(Some(Door::new(Point::new(0.0, 300.0), Edge::Left)));

    let mut list = CommandList::new();
    draw(&mut list, &r);

    let fills = list.fills();
    assert_eq!(
        fills,
        vec![
            (ra, Paint::BlockOff),
            (rb, Paint::BlockEmpty),
            (Rect::new(0.0, 300.0, 10.0, 60.0), Paint::Door),
        ]
    );
    // clear + (fill + stroke) per element
    assert_eq!(list.commands.len(), 1 + 2 * 3);
}

#[test]
fn every_fill_is_followed_by_outline() {
    let mut r = room();
    r.push_block(Block::new(Point::new(0.0, 0.0), Size::new(50.0, 50.0)));
    let mut list = CommandList::new();
    draw(&mut list, &r);
    assert!(matches!(list.commands[2], DrawCommand::Stroke { paint: Paint::Outline, .. }));
}

#[test]
fn redraw_replaces_previous_commands() {
    let mut list = CommandList::new();
    let r = room();
    draw(&mut list, &r);
    draw(&mut list, &r);
    assert_eq!(list.commands.len(), 1);
}
