use battleship_bot::{Ship, ShipError, MAX_SHIP_SIZE, MIN_SHIP_SIZE};

#[test]
fn test_new_ship_is_afloat() -> Result<(), ShipError> {
    let ship = Ship::new(3)?;
    assert_eq!(ship.size(), 3);
    assert_eq!(ship.hits(), 0);
    assert!(!ship.is_sunk());
    Ok(())
}

#[test]
fn test_hits_until_sunk() -> Result<(), ShipError> {
    let mut ship = Ship::new(2)?;
    ship.hit();
    assert!(!ship.is_sunk());
    ship.hit();
    assert!(ship.is_sunk());
    // extra hits do not push the counter past the size
    ship.hit();
    assert_eq!(ship.hits(), 2);
    assert!(ship.is_sunk());
    Ok(())
}

#[test]
fn test_size_bounds() {
    assert!(Ship::new(MIN_SHIP_SIZE).is_ok());
    assert!(Ship::new(MAX_SHIP_SIZE).is_ok());
    assert_eq!(
        Ship::new(0),
        Err(ShipError::InvalidSize {
            size: 0,
            min: MIN_SHIP_SIZE,
            max: MAX_SHIP_SIZE
        })
    );
    assert!(Ship::new(MAX_SHIP_SIZE + 1).is_err());
}

#[test]
fn test_custom_bounds() {
    assert!(Ship::within(1, 2..=4).is_err());
    assert!(Ship::within(4, 2..=4).is_ok());
    let err = Ship::within(6, 2..=4).unwrap_err();
    assert!(err.to_string().contains("between 2 and 4"));
}

#[test]
fn test_zero_size_rejected_even_when_bounds_allow_it() {
    assert_eq!(
        Ship::within(0, 0..=5),
        Err(ShipError::InvalidSize {
            size: 0,
            min: 1,
            max: 5
        })
    );
    assert!(Ship::within(1, 0..=5).is_ok());
}
