//! GROQ query text used against the content store.

/// Every order, newest first, projected to the fields the dashboard shows.
pub const ORDER_LISTING_QUERY: &str = "*[_type == 'order'] | order(_createdAt desc) {
  _id,
  name,
  email,
  phone,
  totalPrice,
  cartItems[] {
    _key,
    title,
    quantity,
    price,
    image
  },
  _createdAt
}";
