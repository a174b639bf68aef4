use crate::tapering::{Sector, Z2SymmetryError};

#[test]
fn test_sector_enumeration_order() {
    let sectors = Sector::enumerate(2).collect::<Vec<_>>();
    let signs = sectors.iter().map(|s| s.signs().to_vec()).collect::<Vec<_>>();
    assert_eq!(
        signs,
        vec![vec![1, 1], vec![1, -1], vec![-1, 1], vec![-1, -1]]
    );
    for (i, sector) in sectors.iter().enumerate() {
        assert_eq!(sector.index(), i);
        assert_eq!(&Sector::from_index(2, i), sector);
    }
}

#[test]
fn test_sector_enumeration_of_empty_group() {
    let sectors = Sector::enumerate(0).collect::<Vec<_>>();
    assert_eq!(sectors.len(), 1);
    assert!(sectors[0].is_empty());
    assert_eq!(sectors[0].to_string(), "[]");
}

#[test]
fn test_sector_enumeration_count() {
    assert_eq!(Sector::enumerate(5).count(), 32);
    assert_eq!(
        Sector::enumerate(3).next(),
        Some(Sector::all_positive(3))
    );
    assert_eq!(
        Sector::enumerate(3).last().map(|s| s.signs().to_vec()),
        Some(vec![-1, -1, -1])
    );
}

#[test]
fn test_sector_validation() {
    assert!(Sector::new(vec![1, -1, 1]).is_ok());
    assert!(matches!(
        Sector::new(vec![1, 0]),
        Err(Z2SymmetryError::InvalidSector(_))
    ));
    assert!(serde_yaml::from_str::<Sector>("[1, 2]").is_err());
    let sector: Sector = serde_yaml::from_str("[-1, 1]").unwrap();
    assert_eq!(sector.sign(0), -1.0);
    assert_eq!(sector.to_string(), "[-1, +1]");
}
