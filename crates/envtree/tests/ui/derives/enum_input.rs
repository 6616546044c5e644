use envtree::DescribeConfig;

#[derive(DescribeConfig)]
enum TestConfig {}

fn main() {}
