use serde::{Deserialize, Serialize};

pub type ProductId = u64;

/// Catalog metadata for a single product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(alias = "productId")]
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    #[serde(rename = "image", alias = "imageUrl")]
    pub image_url: String,
}

/// Available quantity for a product. Fetched per mutation, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockInfo {
    #[serde(rename = "id", alias = "productId")]
    pub product_id: ProductId,
    pub amount: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(rename = "id", alias = "productId")]
    pub product_id: ProductId,
    pub title: String,
    pub price: f64,
    #[serde(rename = "image", alias = "imageUrl")]
    pub image_url: String,
    pub amount: u32,
}

impl CartLine {
    pub fn from_product(product: Product, amount: u32) -> Self {
        Self {
            product_id: product.id,
            title: product.title,
            price: product.price,
            image_url: product.image_url,
            amount,
        }
    }

    pub fn with_amount(&self, amount: u32) -> Self {
        Self {
            amount,
            ..self.clone()
        }
    }
}

/// Ordered cart contents. Lines keep the order in which products were first added.
///
/// Every mutation builds a new `Cart`; existing values are never changed in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
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

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    /// Quantity currently held for `product_id`, zero when absent.
    pub fn amount_of(&self, product_id: ProductId) -> u32 {
        self.line(product_id).map(|line| line.amount).unwrap_or(0)
    }

    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.amount)).sum()
    }

    pub fn subtotal(&self) -> f64 {
        self.lines
            .iter()
            .map(|line| line.price * f64::from(line.amount))
            .sum()
    }

    /// Appends `line`, or replaces the existing line for the same product in its position.
    pub fn with_line(&self, line: CartLine) -> Self {
        let mut lines = self.lines.clone();
        match lines.iter().position(|l| l.product_id == line.product_id) {
            Some(index) => lines[index] = line,
            None => lines.push(line),
        }
        Self { lines }
    }

    pub fn without(&self, product_id: ProductId) -> Self {
        Self {
            lines: self
                .lines
                .iter()
                .filter(|line| line.product_id != product_id)
                .cloned()
                .collect(),
        }
    }
}

impl From<Vec<CartLine>> for Cart {
    /// Builds a cart keeping the first line seen for each product.
    fn from(lines: Vec<CartLine>) -> Self {
        let mut cart = Cart::new();
        for line in lines {
            if cart.line(line.product_id).is_none() {
                cart.lines.push(line);
            }
        }
        cart
    }
}
