use crate::{Direction, Move, Square, StoneKind, MAX_BOARD_SIZE};

impl quickcheck::Arbitrary for StoneKind {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&[StoneKind::Flat, StoneKind::Standing, StoneKind::Capstone])
            .unwrap()
    }
}

impl quickcheck::Arbitrary for Direction {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&Direction::ALL).unwrap()
    }
}

impl quickcheck::Arbitrary for Square {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let column = u8::arbitrary(g) % MAX_BOARD_SIZE as u8;
        let row = u8::arbitrary(g) % MAX_BOARD_SIZE as u8;
        Square::new(column, row)
    }
}

impl quickcheck::Arbitrary for Move {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        if bool::arbitrary(g) {
            return Move::placement(Square::arbitrary(g), StoneKind::arbitrary(g));
        }

        let count = u8::arbitrary(g) % MAX_BOARD_SIZE as u8 + 1;
        // Split the count into positive drops
        let mut drops = Vec::new();
        let mut remaining = count;
        while remaining > 0 {
            let drop = u8::arbitrary(g) % remaining + 1;
            drops.push(drop);
            remaining -= drop;
        }
        // A flat top is never written out, so it can't be parsed back
        let top = *g
            .choose(&[None, Some(StoneKind::Standing), Some(StoneKind::Capstone)])
            .unwrap();
        Move::Slide {
            origin: Square::arbitrary(g),
            count,
            direction: Direction::arbitrary(g),
            drops,
            top,
        }
    }
}
