use std::fmt;

/// Stores the comparison commands query by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Store {
    TraderJoes,
    Aldi,
    Giant,
    Safeway,
    Publix,
}

impl Store {
    pub const ALL: [Store; 5] = [
        Store::TraderJoes,
        Store::Aldi,
        Store::Giant,
        Store::Safeway,
        Store::Publix,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Store::TraderJoes => "Trader Joe's",
            Store::Aldi => "Aldi",
            Store::Giant => "Giant",
            Store::Safeway => "Safeway",
            Store::Publix => "Publix",
        }
    }
}

impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) fn barcode_prompt(barcode: &str) -> String {
    format!(
        "I have scanned a barcode: {barcode}. Please search for information about this product.\n\
         Return the product's:\n\
         - Name\n\
         - Category\n\
         - Normal price range\n\
         - Nutritional information (if available)\n\
         - Any other relevant details\n\
         \n\
         Format the response in a clear, readable way that would be helpful for a grocery shopping app."
    )
}

pub(crate) fn price_comparison_prompt(item: &str, store: &str) -> String {
    format!(
        "I want to compare the price of {item} at {store}.\n\
         Please provide:\n\
         1. Current price at {store}\n\
         2. Whether it's on sale or regular price\n\
         3. Unit price (per oz, lb, etc.) if available\n\
         4. Brand information\n\
         5. Comparison to prices at other major stores\n\
         6. Any special deals or promotions\n\
         \n\
         Return the information in a structured format that's easy to parse."
    )
}

const RECEIPT_CATEGORIES: &str = "Baby Care, Baby Products, Baby Snacks, Baked Goods, Beans, \
    Beverages, Bread, Breakfast, Canned Goods, Cereal, Dairy, Dessert, Fresh Fruit, \
    Fresh Vegetable, Frozen Food, Fruits, Gift, Grains, Household Items, Meat, Pantry, Pasta, \
    Salad, Salad Dressing, Seafood, Shampoo, Snacks, Vegetables, Salt/Pepper, Yogurt, Chicken, \
    Steak, Sauce, Chips, Cheese, Deli Meats, Coffee, Tortilla, Butter, Bars, Diapers, \
    Cleaning products, Soap, Eggs, Pizza, Unknown, Milk, Chocolate, Oil, Gum, Dip, Mayo, \
    Lettuce, Chocolate Bar, Other";

pub(crate) fn receipt_prompt() -> String {
    format!(
        "You are an expert receipt scanner for a grocery tracking app. I have a photo of my grocery receipt.\n\
         Extract ALL grocery items with their prices.\n\
         \n\
         Return the data as a list in this exact JSON format:\n\
         [\n\
         {{\n\
         \x20   \"name\": \"Item name\",\n\
         \x20   \"price\": price as number,\n\
         \x20   \"quantity\": quantity as number,\n\
         \x20   \"category\": \"Best guess category\",\n\
         \x20   \"price_per_unit\": price_per_unit as number,\n\
         \x20   \"date\": date as string\n\
         }}\n\
         ]\n\
         \n\
         Categories should be one of: {RECEIPT_CATEGORIES}\n\
         \n\
         Only include actual grocery items, not totals, taxes, or store information.\n\
         \n\
         \"price_per_unit\" is the price divided by the quantity. If the quantity is not available, \
         assume it is 1 and the price per unit equals the total price. For items sold by weight, \
         include the unit of measurement in the price per unit calculation. If a package contains \
         multiple items, the price per unit should reflect each individual item.\n\
         \n\
         The \"date\" is usually printed at the top or bottom of the receipt, in formats such as \
         MM/DD/YYYY, DD/MM/YYYY, or \"January 1, 2023\", and may follow labels like \"Date:\" or \
         \"Transaction Date:\". If no date is present, use the current date."
    )
}
