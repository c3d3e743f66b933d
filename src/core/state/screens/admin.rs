//! Admin section: the signed-in user's products and the product editor

use lazy_static::lazy_static;

use crate::{
    core::{
        cmd::ShopAction,
        msg::{nav::NavMsg, screen::ScreenMsg, shop::ShopResponse, Msg},
        state::{
            screens::{auth::apply_form_msg, ListCursor, ScreenCtx},
            system::Alert,
        },
    },
    domain::{
        form::{FieldId, FieldSpec, FormState},
        navigation::{Route, RouteParams},
        request::AsyncSlot,
        shop::{Product, ProductDraft, ProductId, ProductPatch},
    },
};

pub const TITLE: FieldId = FieldId::new("title");
pub const IMAGE_URL: FieldId = FieldId::new("image_url");
pub const PRICE: FieldId = FieldId::new("price");
pub const DESCRIPTION: FieldId = FieldId::new("description");

lazy_static! {
    static ref TITLE_FIELD: FieldSpec = FieldSpec::new("title", "Title")
        .required()
        .error_text("Please enter the title!");
    static ref IMAGE_URL_FIELD: FieldSpec = FieldSpec::new("image_url", "Image Url")
        .required()
        .error_text("Please enter the image URL!");
    static ref PRICE_FIELD: FieldSpec = FieldSpec::new("price", "Price")
        .required()
        .min(0.0)
        .error_text("Please enter the price!");
    static ref DESCRIPTION_FIELD: FieldSpec = FieldSpec::new("description", "Description")
        .required()
        .multiline()
        .error_text("Please enter the description!");
}

/// Price is only asked for when creating; it never changes afterwards.
fn product_fields(creating: bool) -> Vec<FieldSpec> {
    let mut fields = vec![TITLE_FIELD.clone(), IMAGE_URL_FIELD.clone()];
    if creating {
        fields.push(PRICE_FIELD.clone());
    }
    fields.push(DESCRIPTION_FIELD.clone());
    fields
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserProductsScreen {
    pub fetch: AsyncSlot,
    pub delete: AsyncSlot,
    pub cursor: ListCursor,
}

impl UserProductsScreen {
    pub fn mount(ctx: &mut ScreenCtx) -> Self {
        let mut screen = Self::default();
        ctx.dispatch.shop(&mut screen.fetch, ShopAction::FetchProducts);
        screen
    }

    pub fn selected<'s>(&self, products: &'s [Product]) -> Option<&'s Product> {
        self.cursor
            .selected(products.len())
            .and_then(|index| products.get(index))
    }

    pub fn update(&mut self, msg: ScreenMsg, ctx: &mut ScreenCtx) {
        let products = &ctx.store.products.user_products;
        if self.cursor.update(&msg, products.len()) {
            return;
        }
        match msg {
            ScreenMsg::Activate | ScreenMsg::EditSelected => {
                if let Some(product) = self.selected(products) {
                    let params = RouteParams::product(product);
                    ctx.dispatch.emit(NavMsg::with_params(Route::EditProduct, params));
                }
            }
            ScreenMsg::NewProduct => ctx.dispatch.emit(NavMsg::to(Route::EditProduct)),
            ScreenMsg::DeleteSelected => {
                if self.delete.is_loading() {
                    return;
                }
                if let Some(product) = self.selected(products) {
                    let confirm = Msg::Screen(ScreenMsg::ConfirmDelete(product.id.clone()));
                    ctx.dispatch.alert(Alert::confirm(
                        "Are you sure?",
                        "Do you really want to delete this item?",
                        confirm,
                    ));
                }
            }
            ScreenMsg::ConfirmDelete(id) => {
                ctx.dispatch.shop(&mut self.delete, ShopAction::DeleteProduct(id));
            }
            ScreenMsg::Refresh => {
                ctx.dispatch.shop(&mut self.fetch, ShopAction::FetchProducts);
            }
            _ => {}
        }
    }

    pub fn settle(&mut self, response: &ShopResponse, ctx: &mut ScreenCtx) -> bool {
        let outcome = response.outcome();
        if self.fetch.settle(response.request, outcome) {
            return true;
        }
        if !self.delete.settle(response.request, outcome) {
            return false;
        }
        if let Err(message) = outcome {
            ctx.dispatch.error_alert(message);
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditProductScreen {
    /// Product being edited; `None` creates a new one
    pub product_id: Option<ProductId>,
    pub form: FormState,
    pub submit: AsyncSlot,
}

impl EditProductScreen {
    pub fn mount(params: &RouteParams, ctx: &mut ScreenCtx) -> Self {
        let existing = params
            .product_id
            .as_ref()
            .and_then(|id| ctx.store.products.find_user_product(id));

        match existing {
            Some(product) => Self {
                product_id: Some(product.id.clone()),
                form: FormState::seeded(
                    product_fields(false),
                    [
                        (TITLE, product.title.clone()),
                        (IMAGE_URL, product.image_url.clone()),
                        (DESCRIPTION, product.description.clone()),
                    ],
                ),
                submit: AsyncSlot::default(),
            },
            None => {
                if let Some(id) = &params.product_id {
                    log::warn!("Product {id} is not among the user's products; creating instead");
                }
                Self {
                    product_id: None,
                    form: FormState::blank(product_fields(true)),
                    submit: AsyncSlot::default(),
                }
            }
        }
    }

    pub fn title(&self) -> &'static str {
        if self.product_id.is_some() {
            "Edit Product"
        } else {
            "Add Product"
        }
    }

    pub fn params_differ(&self, params: &RouteParams) -> bool {
        self.product_id != params.product_id
    }

    pub fn update(&mut self, msg: ScreenMsg, ctx: &mut ScreenCtx) {
        if self.submit.is_loading() {
            return;
        }
        match msg {
            ScreenMsg::Form(form_msg) => apply_form_msg(&mut self.form, form_msg),
            ScreenMsg::Submit => self.submit(ctx),
            _ => {}
        }
    }

    fn submit(&mut self, ctx: &mut ScreenCtx) {
        if !self.form.is_valid() {
            self.form.touch_all();
            ctx.dispatch.wrong_input();
            return;
        }
        let title = self.form.value(TITLE).trim().to_string();
        let image_url = self.form.value(IMAGE_URL).trim().to_string();
        let description = self.form.value(DESCRIPTION).to_string();

        let action = match &self.product_id {
            Some(id) => ShopAction::UpdateProduct {
                id: id.clone(),
                patch: ProductPatch {
                    title,
                    description,
                    image_url,
                },
            },
            None => {
                let Ok(price) = self.form.value(PRICE).trim().parse::<f64>() else {
                    ctx.dispatch.wrong_input();
                    return;
                };
                ShopAction::CreateProduct(ProductDraft {
                    title,
                    description,
                    image_url,
                    price,
                })
            }
        };
        ctx.dispatch.shop(&mut self.submit, action);
    }

    pub fn settle(&mut self, response: &ShopResponse, ctx: &mut ScreenCtx) -> bool {
        if !self.submit.settle(response.request, response.outcome()) {
            return false;
        }
        match response.outcome() {
            Ok(()) => ctx.dispatch.emit(NavMsg::Back),
            Err(message) => ctx.dispatch.error_alert(message),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::{
        msg::{
            screen::FormMsg,
            shop::ShopReply,
            store::ProductsMsg,
            system::SystemMsg,
        },
        state::screens::test_support::{request_of, shop_actions, Fixture},
    };
    use crate::domain::shop::UserId;

    fn fixture() -> Fixture {
        let mut fixture = Fixture::default();
        let products = vec![
            Product::new("p1", "u1", "Red Shirt", "img", "A red t-shirt", 29.99),
            Product::new("p2", "u2", "Blue Carpet", "img", "Fits your red shirt", 99.99),
            Product::new("p3", "u1", "Coffee Mug", "img", "Can also be used for tea!", 8.99),
        ];
        fixture
            .products
            .update(ProductsMsg::Set(products), Some(&UserId::from("u1")));
        fixture
    }

    fn type_text(screen: &mut EditProductScreen, fixture: &mut Fixture, text: &str) {
        for c in text.chars() {
            fixture.run(|ctx| screen.update(ScreenMsg::Form(FormMsg::InsertChar(c)), ctx));
        }
    }

    fn next_field(screen: &mut EditProductScreen, fixture: &mut Fixture) {
        fixture.run(|ctx| screen.update(ScreenMsg::Form(FormMsg::FocusNext), ctx));
    }

    #[test]
    fn test_edit_selected_passes_product_params() {
        let mut fixture = fixture();
        let mut screen = UserProductsScreen::default();
        fixture.run(|ctx| screen.update(ScreenMsg::ScrollDown, ctx));

        let (_, _, msgs) = fixture.run(|ctx| screen.update(ScreenMsg::EditSelected, ctx));
        assert_eq!(
            msgs,
            vec![Msg::Nav(NavMsg::with_params(
                Route::EditProduct,
                RouteParams {
                    product_id: Some("p3".into()),
                    product_title: Some("Coffee Mug".to_string()),
                }
            ))]
        );
    }

    #[test]
    fn test_delete_asks_for_confirmation_first() {
        let mut fixture = fixture();
        let mut screen = UserProductsScreen::default();

        let (_, cmds, msgs) = fixture.run(|ctx| screen.update(ScreenMsg::DeleteSelected, ctx));
        assert!(cmds.is_empty());
        assert_eq!(
            msgs,
            vec![Msg::System(SystemMsg::ShowAlert(Alert::confirm(
                "Are you sure?",
                "Do you really want to delete this item?",
                Msg::Screen(ScreenMsg::ConfirmDelete("p1".into())),
            )))]
        );

        let (_, cmds, _) =
            fixture.run(|ctx| screen.update(ScreenMsg::ConfirmDelete("p1".into()), ctx));
        assert_eq!(shop_actions(&cmds), vec![&ShopAction::DeleteProduct("p1".into())]);
        assert!(screen.delete.is_loading());
    }

    #[test]
    fn test_delete_failure_alerts() {
        let mut fixture = fixture();
        let mut screen = UserProductsScreen::default();
        let (_, cmds, _) =
            fixture.run(|ctx| screen.update(ScreenMsg::ConfirmDelete("p1".into()), ctx));
        let response = ShopResponse::err(request_of(&cmds).unwrap(), "Something went wrong!");

        let (accepted, _, msgs) = fixture.run(|ctx| screen.settle(&response, ctx));
        assert!(accepted);
        assert_eq!(
            msgs,
            vec![Msg::System(SystemMsg::ShowAlert(Alert::info(
                "An error occurred!",
                "Something went wrong!"
            )))]
        );
        assert_eq!(screen.delete.error(), Some("Something went wrong!"));
    }

    #[test]
    fn test_edit_form_is_seeded_and_submittable() {
        let mut fixture = fixture();
        let (mut screen, _, _) = fixture.run(|ctx| {
            EditProductScreen::mount(&RouteParams::product_id("p1".into()), ctx)
        });
        assert_eq!(screen.title(), "Edit Product");
        assert_eq!(screen.form.value(TITLE), "Red Shirt");
        assert_eq!(screen.form.validity(PRICE), None);
        assert!(screen.form.is_valid());

        let (_, cmds, _) = fixture.run(|ctx| screen.update(ScreenMsg::Submit, ctx));
        assert_eq!(
            shop_actions(&cmds),
            vec![&ShopAction::UpdateProduct {
                id: "p1".into(),
                patch: ProductPatch {
                    title: "Red Shirt".to_string(),
                    description: "A red t-shirt".to_string(),
                    image_url: "img".to_string(),
                },
            }]
        );
    }

    #[test]
    fn test_foreign_product_opens_create_form() {
        let mut fixture = fixture();
        let (screen, _, _) = fixture.run(|ctx| {
            EditProductScreen::mount(&RouteParams::product_id("p2".into()), ctx)
        });
        assert_eq!(screen.title(), "Add Product");
        assert_eq!(screen.product_id, None);
    }

    #[test]
    fn test_create_form_gate_and_submit() {
        let mut fixture = fixture();
        let (mut screen, _, _) = fixture.run(|ctx| EditProductScreen::mount(&RouteParams::default(), ctx));
        assert!(!screen.form.is_valid());

        let (_, cmds, msgs) = fixture.run(|ctx| screen.update(ScreenMsg::Submit, ctx));
        assert!(cmds.is_empty());
        assert_eq!(msgs.len(), 1);

        type_text(&mut screen, &mut fixture, "Pen & Paper");
        next_field(&mut screen, &mut fixture);
        type_text(&mut screen, &mut fixture, "https://example.com/pen.jpg");
        next_field(&mut screen, &mut fixture);
        type_text(&mut screen, &mut fixture, "5.49");
        next_field(&mut screen, &mut fixture);
        type_text(&mut screen, &mut fixture, "Write it down");
        assert!(screen.form.is_valid());

        let (_, cmds, _) = fixture.run(|ctx| screen.update(ScreenMsg::Submit, ctx));
        assert_eq!(
            shop_actions(&cmds),
            vec![&ShopAction::CreateProduct(ProductDraft {
                title: "Pen & Paper".to_string(),
                description: "Write it down".to_string(),
                image_url: "https://example.com/pen.jpg".to_string(),
                price: 5.49,
            })]
        );

        let product = Product::new("p9", "u1", "Pen & Paper", "img", "Write it down", 5.49);
        let response = ShopResponse::ok(request_of(&cmds).unwrap(), ShopReply::ProductCreated(product));
        let (_, _, msgs) = fixture.run(|ctx| screen.settle(&response, ctx));
        assert_eq!(msgs, vec![Msg::Nav(NavMsg::Back)]);
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let mut fixture = fixture();
        let (mut screen, _, _) = fixture.run(|ctx| EditProductScreen::mount(&RouteParams::default(), ctx));
        next_field(&mut screen, &mut fixture);
        next_field(&mut screen, &mut fixture);
        type_text(&mut screen, &mut fixture, "-1");
        assert_eq!(screen.form.validity(PRICE), Some(false));
        assert_eq!(screen.form.error_for(PRICE), Some("Please enter the price!"));
    }

    #[test]
    fn test_short_description_is_accepted() {
        let mut fixture = fixture();
        let (mut screen, _, _) = fixture.run(|ctx| EditProductScreen::mount(&RouteParams::default(), ctx));
        for (index, text) in ["Pen", "img", "1", "Nice"].into_iter().enumerate() {
            if index > 0 {
                next_field(&mut screen, &mut fixture);
            }
            type_text(&mut screen, &mut fixture, text);
        }

        assert_eq!(screen.form.validity(DESCRIPTION), Some(true));
        assert!(screen.form.is_valid());
    }
}
