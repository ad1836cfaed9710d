use crate::error::{EngineError, EngineResult};

use super::{Money, Product};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CartLine {
    pub product_id: u32,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
}

impl CartLine {
    pub fn subtotal(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

/// Shopping cart lines in the order products were first added.
///
/// Totals are never stored; they are summed from the lines on each call.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: u32) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn add_item(&self, product: &Product) -> EngineResult<Self> {
        let mut next = self.clone();
        match next.lines.iter_mut().find(|line| line.product_id == product.id) {
            Some(line) => {
                let quantity = i64::from(line.quantity) + 1;
                line.quantity = line.quantity.checked_add(1).ok_or(
                    EngineError::QuantityTooLarge {
                        product_id: product.id,
                        quantity,
                    },
                )?;
            }
            None => next.lines.push(CartLine {
                product_id: product.id,
                name: product.name.clone(),
                unit_price: product.price,
                quantity: 1,
            }),
        }
        Ok(next)
    }

    /// Sets a line's quantity; zero or less drops the line.
    pub fn set_quantity(&self, product_id: u32, quantity: i64) -> EngineResult<Self> {
        if self.line(product_id).is_none() {
            return Err(EngineError::UnknownCartLine(product_id));
        }
        if quantity <= 0 {
            return Ok(self.remove_item(product_id));
        }

        let quantity = u32::try_from(quantity).map_err(|_| EngineError::QuantityTooLarge {
            product_id,
            quantity,
        })?;
        let mut next = self.clone();
        next.lines
            .iter_mut()
            .filter(|line| line.product_id == product_id)
            .for_each(|line| line.quantity = quantity);
        Ok(next)
    }

    pub fn remove_item(&self, product_id: u32) -> Self {
        Self {
            lines: self
                .lines
                .iter()
                .filter(|line| line.product_id != product_id)
                .cloned()
                .collect(),
        }
    }

    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shop::conservation_products;

    fn shirt_and_bottle() -> (Product, Product) {
        let products = conservation_products();
        (products[0].clone(), products[1].clone())
    }

    #[test]
    fn test_adding_same_product_increments_one_line() {
        let (shirt, _) = shirt_and_bottle();
        let cart = Cart::new()
            .add_item(&shirt)
            .and_then(|cart| cart.add_item(&shirt))
            .unwrap();

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_total_is_exact() {
        let (shirt, bottle) = shirt_and_bottle();
        let cart = Cart::new()
            .add_item(&shirt)
            .and_then(|cart| cart.add_item(&bottle))
            .and_then(|cart| cart.add_item(&shirt))
            .unwrap();

        assert_eq!(cart.total(), Money::from_cents(8497));
        assert_eq!(cart.total().to_string(), "$84.97");
        assert_eq!(cart.item_count(), 3);
        // lines stay in first-added order
        assert_eq!(
            cart.lines().iter().map(|l| l.product_id).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn test_set_quantity() {
        let (shirt, bottle) = shirt_and_bottle();
        let cart = Cart::new()
            .add_item(&shirt)
            .and_then(|cart| cart.add_item(&bottle))
            .unwrap();

        let cart = cart.set_quantity(shirt.id, 4).unwrap();
        assert_eq!(cart.line(shirt.id).map(|l| l.quantity), Some(4));
        assert_eq!(cart.item_count(), 5);

        let cart = cart.set_quantity(shirt.id, 0).unwrap();
        assert!(cart.line(shirt.id).is_none());

        let cart = cart.set_quantity(bottle.id, -3).unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::ZERO);
    }

    #[test]
    fn test_set_quantity_on_missing_line_creates_nothing() {
        let (shirt, bottle) = shirt_and_bottle();
        let cart = Cart::new().add_item(&shirt).unwrap();

        assert_eq!(
            cart.set_quantity(bottle.id, 2),
            Err(EngineError::UnknownCartLine(bottle.id))
        );
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_remove_item() {
        let (shirt, bottle) = shirt_and_bottle();
        let cart = Cart::new()
            .add_item(&shirt)
            .and_then(|cart| cart.add_item(&bottle))
            .and_then(|cart| cart.add_item(&bottle))
            .unwrap();

        let cart = cart.remove_item(bottle.id);
        assert_eq!(cart.item_count(), 1);
        // removing again is harmless
        assert_eq!(cart.remove_item(bottle.id), cart);
    }

    #[test]
    fn test_quantity_beyond_u32_is_rejected() {
        let (shirt, _) = shirt_and_bottle();
        let cart = Cart::new().add_item(&shirt).unwrap();

        assert_eq!(
            cart.set_quantity(shirt.id, 5_000_000_000),
            Err(EngineError::QuantityTooLarge {
                product_id: shirt.id,
                quantity: 5_000_000_000,
            })
        );
        assert_eq!(cart.line(shirt.id).map(|l| l.quantity), Some(1));

        let cart = cart.set_quantity(shirt.id, i64::from(u32::MAX)).unwrap();
        assert_eq!(cart.line(shirt.id).map(|l| l.quantity), Some(u32::MAX));
    }

    #[test]
    fn test_adding_to_a_full_line_is_rejected() {
        let (shirt, _) = shirt_and_bottle();
        let full = Cart::new()
            .add_item(&shirt)
            .and_then(|cart| cart.set_quantity(shirt.id, i64::from(u32::MAX)))
            .unwrap();

        assert_eq!(
            full.add_item(&shirt),
            Err(EngineError::QuantityTooLarge {
                product_id: shirt.id,
                quantity: i64::from(u32::MAX) + 1,
            })
        );
        assert_eq!(full.line(shirt.id).map(|l| l.quantity), Some(u32::MAX));
    }

    #[test]
    fn test_item_count_of_large_lines() {
        let (shirt, bottle) = shirt_and_bottle();
        let cart = Cart::new()
            .add_item(&shirt)
            .and_then(|cart| cart.add_item(&bottle))
            .and_then(|cart| cart.set_quantity(shirt.id, 3_000_000_000))
            .and_then(|cart| cart.set_quantity(bottle.id, 3_000_000_000))
            .unwrap();

        assert_eq!(cart.item_count(), 6_000_000_000);
        assert_eq!(
            cart.total(),
            Money::from_cents(3_000_000_000 * 2999 + 3_000_000_000 * 2499)
        );
    }

    #[test]
    fn test_quantity_of_one_is_the_smallest_line() {
        let (shirt, _) = shirt_and_bottle();
        let cart = Cart::new().add_item(&shirt).unwrap();

        let cart = cart.set_quantity(shirt.id, 1).unwrap();
        assert_eq!(cart.line(shirt.id).map(|l| l.quantity), Some(1));
        assert!(cart.set_quantity(shirt.id, 0).unwrap().is_empty());
    }
}
