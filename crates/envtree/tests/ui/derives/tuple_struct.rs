use envtree::DescribeConfig;

#[derive(DescribeConfig)]
struct TestConfig(u64);

fn main() {}
