use battleship_match::{BitBoard, BitBoardError, Grid};

#[test]
fn test_try_new_sizes() {
    let ok = BitBoard::<u64, 8>::try_new();
    assert!(ok.is_ok());

    let err = BitBoard::<u8, 3>::try_new();
    assert!(matches!(err, Err(BitBoardError::SizeTooLarge { .. })));
}

#[test]
fn test_insert_contains() {
    let mut bb = BitBoard::<u16, 4>::new();
    assert!(bb.is_empty());

    bb.insert(1, 1).unwrap();
    assert!(bb.contains(1, 1));
    assert!(!bb.contains(1, 2));
    assert!(!bb.contains(7, 7));

    assert_eq!(
        bb.insert(4, 0),
        Err(BitBoardError::IndexOutOfBounds { row: 4, col: 0 })
    );
    assert_eq!(bb.len(), 1);
}

#[test]
fn test_from_cells_and_iter() {
    let bb = BitBoard::<u16, 4>::from_cells([(3, 3), (0, 1)]).unwrap();
    let cells: Vec<_> = bb.iter().collect();
    assert_eq!(cells, vec![(0, 1), (3, 3)]);
}

#[test]
fn test_halo_clips_at_edges() {
    let corner = Grid::from_cells([(0, 0)]).unwrap();
    assert_eq!(corner.halo().len(), 4);

    let center = Grid::from_cells([(5, 5)]).unwrap();
    let halo = center.halo();
    assert_eq!(halo.len(), 9);
    assert!(halo.contains(4, 4) && halo.contains(6, 6));
    assert!(!halo.contains(7, 5));

    let run = Grid::from_cells([(0, 0), (0, 1), (0, 2), (0, 3)]).unwrap();
    assert_eq!(run.halo().len(), 10);
    assert!(run.halo().contains(0, 4));
    assert!(run.halo().contains(1, 4));
}

#[test]
fn test_set_operations() {
    let a = Grid::from_cells([(0, 0), (1, 1)]).unwrap();
    let b = Grid::from_cells([(1, 1), (2, 2)]).unwrap();
    assert!(a.intersects(&b));
    assert_eq!((a & b).len(), 1);
    assert_eq!((a | b).len(), 3);
    assert!((a & b).is_subset(&a));
    assert!(!a.is_subset(&b));
    assert_eq!((!Grid::new()).len(), 100);
    assert_eq!(Grid::full(), !Grid::new());
}
