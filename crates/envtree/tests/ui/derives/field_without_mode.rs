use envtree::DescribeConfig;

#[derive(DescribeConfig)]
struct TestConfig {
    port: u16,
}

fn main() {}
