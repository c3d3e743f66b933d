//! Products section: overview, product detail and the cart

use crate::{
    core::{
        cmd::ShopAction,
        msg::{
            nav::NavMsg,
            screen::ScreenMsg,
            shop::ShopResponse,
            store::CartMsg,
        },
        state::screens::{ListCursor, ScreenCtx},
    },
    domain::{
        navigation::{Route, RouteParams},
        request::AsyncSlot,
        shop::{Order, Product, ProductId},
    },
};

fn add_to_cart(product: &Product, ctx: &mut ScreenCtx) {
    ctx.dispatch.emit(CartMsg::Add(product.clone()));
    ctx.dispatch.status(format!("Added {} to the cart", product.title));
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductsOverviewScreen {
    pub fetch: AsyncSlot,
    pub cursor: ListCursor,
}

impl ProductsOverviewScreen {
    pub fn mount(ctx: &mut ScreenCtx) -> Self {
        let mut screen = Self::default();
        screen.load(ctx);
        screen
    }

    /// The overview refetches whenever it comes back into view
    pub fn on_focus(&mut self, ctx: &mut ScreenCtx) {
        self.load(ctx);
    }

    fn load(&mut self, ctx: &mut ScreenCtx) {
        ctx.dispatch.shop(&mut self.fetch, ShopAction::FetchProducts);
    }

    pub fn selected<'s>(&self, products: &'s [Product]) -> Option<&'s Product> {
        self.cursor
            .selected(products.len())
            .and_then(|index| products.get(index))
    }

    pub fn update(&mut self, msg: ScreenMsg, ctx: &mut ScreenCtx) {
        let products = &ctx.store.products.available;
        if self.cursor.update(&msg, products.len()) {
            return;
        }
        match msg {
            ScreenMsg::Activate => {
                if let Some(product) = self.selected(products) {
                    let params = RouteParams::product(product);
                    ctx.dispatch.emit(NavMsg::with_params(Route::ProductDetail, params));
                }
            }
            ScreenMsg::AddToCart => {
                if let Some(product) = self.selected(products) {
                    add_to_cart(product, ctx);
                }
            }
            ScreenMsg::Refresh => self.load(ctx),
            _ => {}
        }
    }

    pub fn settle(&mut self, response: &ShopResponse) -> bool {
        self.fetch.settle(response.request, response.outcome())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDetailScreen {
    pub product_id: Option<ProductId>,
    pub title: Option<String>,
    pub scroll: u16,
}

impl ProductDetailScreen {
    pub fn new(params: &RouteParams) -> Self {
        Self {
            product_id: params.product_id.clone(),
            title: params.product_title.clone(),
            scroll: 0,
        }
    }

    pub fn product<'s>(&self, products: &'s [Product]) -> Option<&'s Product> {
        let id = self.product_id.as_ref()?;
        products.iter().find(|p| &p.id == id)
    }

    pub fn update(&mut self, msg: ScreenMsg, ctx: &mut ScreenCtx) {
        match msg {
            ScreenMsg::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            ScreenMsg::ScrollDown => self.scroll = self.scroll.saturating_add(1),
            ScreenMsg::ScrollToTop => self.scroll = 0,
            ScreenMsg::AddToCart | ScreenMsg::Activate => {
                match self.product(&ctx.store.products.available) {
                    Some(product) => add_to_cart(product, ctx),
                    None => ctx.dispatch.status("This product is no longer available"),
                }
            }
            _ => {}
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartScreen {
    pub order: AsyncSlot,
    pub cursor: ListCursor,
}

impl CartScreen {
    pub fn selected(&self, ctx: &ScreenCtx) -> Option<ProductId> {
        let cart = &ctx.store.cart.cart;
        let index = self.cursor.selected(cart.len())?;
        cart.iter().nth(index).map(|(id, _)| id.clone())
    }

    pub fn update(&mut self, msg: ScreenMsg, ctx: &mut ScreenCtx) {
        if self.cursor.update(&msg, ctx.store.cart.cart.len()) {
            return;
        }
        match msg {
            ScreenMsg::RemoveFromCart => {
                if let Some(id) = self.selected(ctx) {
                    ctx.dispatch.emit(CartMsg::RemoveOne(id));
                }
            }
            ScreenMsg::OrderNow | ScreenMsg::Activate => self.order_now(ctx),
            _ => {}
        }
    }

    fn order_now(&mut self, ctx: &mut ScreenCtx) {
        let cart = &ctx.store.cart.cart;
        if cart.is_empty() {
            ctx.dispatch.status("Your cart is empty");
            return;
        }
        let action = ShopAction::AddOrder {
            items: Order::lines_from_cart(cart),
            total_amount: cart.total_amount(),
        };
        ctx.dispatch.shop(&mut self.order, action);
    }

    pub fn settle(&mut self, response: &ShopResponse, ctx: &mut ScreenCtx) -> bool {
        if !self.order.settle(response.request, response.outcome()) {
            return false;
        }
        match response.outcome() {
            Ok(()) => ctx.dispatch.status("Order placed"),
            Err(message) => ctx.dispatch.error_alert(message),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        core::{
            msg::{shop::ShopReply, store::ProductsMsg, Msg},
            state::screens::test_support::{request_of, shop_actions, Fixture},
        },
        domain::shop::{OrderId, UserId},
    };

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("p1", "u1", "Red Shirt", "img", "A red t-shirt", 29.99),
            Product::new("p2", "u2", "Blue Carpet", "img", "Fits your red shirt", 99.99),
        ]
    }

    fn fixture() -> Fixture {
        let mut fixture = Fixture::default();
        fixture
            .products
            .update(ProductsMsg::Set(catalog()), Some(&UserId::from("u1")));
        fixture
    }

    #[test]
    fn test_overview_fetches_on_mount_and_skips_duplicate_focus() {
        let mut fixture = fixture();
        let (mut screen, cmds, _) = fixture.run(ProductsOverviewScreen::mount);
        assert_eq!(shop_actions(&cmds), vec![&ShopAction::FetchProducts]);

        let (_, cmds, _) = fixture.run(|ctx| screen.on_focus(ctx));
        assert!(cmds.is_empty());
    }

    #[test]
    fn test_overview_refocus_after_settle_refetches() {
        let mut fixture = fixture();
        let (mut screen, cmds, _) = fixture.run(ProductsOverviewScreen::mount);
        let response = ShopResponse::ok(request_of(&cmds).unwrap(), ShopReply::Products(catalog()));
        assert!(screen.settle(&response));

        let (_, cmds, _) = fixture.run(|ctx| screen.on_focus(ctx));
        assert_eq!(shop_actions(&cmds), vec![&ShopAction::FetchProducts]);
    }

    #[test]
    fn test_overview_error_is_kept_for_retry() {
        let mut fixture = fixture();
        let (mut screen, cmds, _) = fixture.run(ProductsOverviewScreen::mount);
        let response = ShopResponse::err(request_of(&cmds).unwrap(), "Something went wrong!");
        screen.settle(&response);
        assert_eq!(screen.fetch.error(), Some("Something went wrong!"));

        let (_, cmds, _) = fixture.run(|ctx| screen.update(ScreenMsg::Refresh, ctx));
        assert_eq!(cmds.len(), 1);
        assert_eq!(screen.fetch.error(), None);
    }

    #[test]
    fn test_overview_activate_opens_detail_with_params() {
        let mut fixture = fixture();
        let mut screen = ProductsOverviewScreen::default();
        fixture.run(|ctx| screen.update(ScreenMsg::ScrollDown, ctx));

        let (_, _, msgs) = fixture.run(|ctx| screen.update(ScreenMsg::Activate, ctx));
        assert_eq!(
            msgs,
            vec![Msg::Nav(NavMsg::with_params(
                Route::ProductDetail,
                RouteParams {
                    product_id: Some("p2".into()),
                    product_title: Some("Blue Carpet".to_string()),
                }
            ))]
        );
    }

    #[test]
    fn test_overview_add_to_cart() {
        let mut fixture = fixture();
        let mut screen = ProductsOverviewScreen::default();
        let (_, _, msgs) = fixture.run(|ctx| screen.update(ScreenMsg::AddToCart, ctx));
        assert_eq!(msgs[0], Msg::Cart(CartMsg::Add(catalog()[0].clone())));
    }

    #[test]
    fn test_detail_reads_product_from_store() {
        let mut fixture = fixture();
        let mut screen = ProductDetailScreen::new(&RouteParams::product_id("p1".into()));
        let (_, _, msgs) = fixture.run(|ctx| {
            assert_eq!(
                screen.product(&ctx.store.products.available).map(|p| p.price),
                Some(29.99)
            );
            screen.update(ScreenMsg::AddToCart, ctx)
        });
        assert_eq!(msgs.len(), 2);
    }

    #[test]
    fn test_detail_for_deleted_product() {
        let mut fixture = fixture();
        let mut screen = ProductDetailScreen::new(&RouteParams::product_id("gone".into()));
        let (_, _, msgs) = fixture.run(|ctx| screen.update(ScreenMsg::AddToCart, ctx));
        assert_eq!(msgs, vec![Msg::status("This product is no longer available")]);
    }

    #[test]
    fn test_order_now_with_empty_cart_is_refused() {
        let mut fixture = fixture();
        let mut screen = CartScreen::default();
        let (_, cmds, msgs) = fixture.run(|ctx| screen.update(ScreenMsg::OrderNow, ctx));
        assert!(cmds.is_empty());
        assert_eq!(msgs, vec![Msg::status("Your cart is empty")]);
    }

    #[test]
    fn test_order_now_places_cart_snapshot() {
        let mut fixture = fixture();
        fixture.cart.update(CartMsg::Add(catalog()[0].clone()));
        fixture.cart.update(CartMsg::Add(catalog()[0].clone()));
        let mut screen = CartScreen::default();

        let (_, cmds, _) = fixture.run(|ctx| screen.update(ScreenMsg::OrderNow, ctx));
        let actions = shop_actions(&cmds);
        let [ShopAction::AddOrder { items, total_amount }] = actions.as_slice() else {
            panic!("expected a single AddOrder, got {actions:?}");
        };
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 2);
        assert!((total_amount - 59.98).abs() < 1e-9);
        assert!(screen.order.is_loading());

        // Second press while placing is skipped
        let (_, cmds, _) = fixture.run(|ctx| screen.update(ScreenMsg::OrderNow, ctx));
        assert!(cmds.is_empty());
    }

    #[test]
    fn test_order_settles_with_status() {
        let mut fixture = fixture();
        fixture.cart.update(CartMsg::Add(catalog()[1].clone()));
        let mut screen = CartScreen::default();
        let (_, cmds, _) = fixture.run(|ctx| screen.update(ScreenMsg::OrderNow, ctx));
        let order = Order {
            id: OrderId::from("o1"),
            items: vec![],
            total_amount: 99.99,
            date: chrono::Utc::now(),
        };
        let response = ShopResponse::ok(request_of(&cmds).unwrap(), ShopReply::OrderPlaced(order));

        let (accepted, _, msgs) = fixture.run(|ctx| screen.settle(&response, ctx));
        assert!(accepted);
        assert_eq!(msgs, vec![Msg::status("Order placed")]);
    }

    #[test]
    fn test_remove_from_cart_targets_selected_line() {
        let mut fixture = fixture();
        fixture.cart.update(CartMsg::Add(catalog()[0].clone()));
        fixture.cart.update(CartMsg::Add(catalog()[1].clone()));
        let mut screen = CartScreen::default();
        fixture.run(|ctx| screen.update(ScreenMsg::ScrollToBottom, ctx));

        let (_, _, msgs) = fixture.run(|ctx| screen.update(ScreenMsg::RemoveFromCart, ctx));
        assert_eq!(msgs, vec![Msg::Cart(CartMsg::RemoveOne("p2".into()))]);
    }
}
