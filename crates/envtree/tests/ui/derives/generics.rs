use envtree::DescribeConfig;

#[derive(DescribeConfig)]
struct TestConfig<T> {
    #[config(skip)]
    value: T,
}

fn main() {}
