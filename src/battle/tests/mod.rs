mod common;
mod test_bag;
